//! Sign-in form handler.
//!
//! ```text
//! POST /login email=user@nextmail.com&password=123456&redirectTo=/dashboard/invoices
//! ```

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{SignInForm, SignInOutcome, ViewPath};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-in form body.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginFormRequest {
    /// Account email address.
    #[schema(example = "user@nextmail.com")]
    pub email: Option<String>,
    /// Account password.
    #[schema(example = "123456")]
    pub password: Option<String>,
    /// Application path to open after signing in.
    #[schema(example = "/dashboard/invoices")]
    pub redirect_to: Option<String>,
}

impl From<LoginFormRequest> for SignInForm {
    fn from(value: LoginFormRequest) -> Self {
        Self {
            email: value.email,
            password: value.password.map(Zeroizing::new),
            redirect_to: value.redirect_to,
        }
    }
}

/// Where to send the user after signing in.
///
/// Only paths on this origin are honoured; anything else lands on the
/// dashboard.
fn landing_path(redirect_to: Option<&str>) -> ViewPath {
    redirect_to
        .and_then(|raw| ViewPath::new(raw).ok())
        .unwrap_or_else(ViewPath::dashboard)
}

/// Authenticate and establish a session.
///
/// Rejections answer with the message to display as a JSON string.
#[utoipa::path(
    post,
    path = "/login",
    request_body(
        content = LoginFormRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Signed in", headers(("Location" = String), ("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = String),
        (status = 500, description = "Sign-in failed", body = String)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginFormRequest>,
) -> ApiResult<HttpResponse> {
    let form = SignInForm::from(form.into_inner());
    let landing = landing_path(form.redirect_to.as_deref());

    let outcome = state.sign_in.authenticate(form).await?;
    let status = match &outcome {
        SignInOutcome::SignedIn(user_id) => {
            session.sign_in(user_id)?;
            return Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, landing.as_str()))
                .finish());
        }
        SignInOutcome::InvalidCredentials => StatusCode::UNAUTHORIZED,
        SignInOutcome::Failed => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Ok(HttpResponse::build(status).json(outcome.message()))
}

#[cfg(test)]
#[path = "login_tests.rs"]
mod tests;

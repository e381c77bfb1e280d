//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the form endpoints, the form-state and error
//! schemas, and the session cookie security scheme. Swagger UI serves the
//! document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, InvoiceFieldErrors, InvoiceFormState, InvoiceStatus};
use crate::inbound::http::invoices::InvoiceFormRequest;
use crate::inbound::http::login::LoginFormRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the dashboard form endpoints.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Invoice dashboard API",
        description = "Form actions for creating, updating and deleting invoices, plus sign-in."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::invoices::create_invoice,
        crate::inbound::http::invoices::update_invoice,
        crate::inbound::http::invoices::delete_invoice,
    ),
    components(schemas(
        Error,
        ErrorCode,
        InvoiceStatus,
        InvoiceFormState,
        InvoiceFieldErrors,
        InvoiceFormRequest,
        LoginFormRequest
    )),
    tags(
        (name = "invoices", description = "Invoice form actions"),
        (name = "auth", description = "Credential sign-in")
    )
)]
pub struct ApiDoc;

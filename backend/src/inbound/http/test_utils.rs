//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;

/// User signed in by [`seed_session`].
pub const TEST_USER_ID: &str = "410544b2-4001-4271-9855-fec4b6a6442a";
/// Route tests mount [`seed_session`] on.
pub const SEED_SESSION_PATH: &str = "/__test/session";

/// Session middleware with a fresh key, cookie name `session`, and the
/// `Secure` flag disabled for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler that signs in [`TEST_USER_ID`].
pub async fn seed_session(session: SessionContext) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(TEST_USER_ID)
        .map_err(|err| Error::internal(format!("invalid test user id: {err}")))?;
    session.sign_in(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Extract the session cookie set on `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

//! Driving port for the sign-in form.
use async_trait::async_trait;

use crate::domain::{Error, SignInForm, SignInOutcome};

/// Domain use-case port for authenticating a sign-in submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInCommand: Send + Sync {
    /// Attempt sign-in with the submitted form.
    ///
    /// Expected authentication failures resolve to an outcome carrying a
    /// display message. Anything else is returned as `Err` untouched.
    async fn authenticate(&self, form: SignInForm) -> Result<SignInOutcome, Error>;
}

//! Sign-in service implementing [`SignInCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{IdentityProvider, SignInCommand};
use crate::domain::{AuthErrorType, Error, SignInError, SignInForm, SignInOutcome, SignInStrategy};

/// Delegates credential checks to an [`IdentityProvider`].
#[derive(Clone)]
pub struct CredentialAuthenticator<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> CredentialAuthenticator<P> {
    /// Create an authenticator backed by `provider`.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> SignInCommand for CredentialAuthenticator<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn authenticate(&self, form: SignInForm) -> Result<SignInOutcome, Error> {
        match self
            .provider
            .sign_in(SignInStrategy::Credentials, &form)
            .await
        {
            Ok(user_id) => {
                info!(%user_id, "user signed in");
                Ok(SignInOutcome::SignedIn(user_id))
            }
            Err(SignInError::Auth(auth)) => {
                warn!(kind = %auth.kind(), detail = auth.message(), "sign-in rejected");
                match auth.kind() {
                    AuthErrorType::CredentialsSignin => Ok(SignInOutcome::InvalidCredentials),
                    _ => Ok(SignInOutcome::Failed),
                }
            }
            Err(SignInError::Unexpected(error)) => Err(error),
        }
    }
}

//! Driven port for the external identity provider.
//!
//! Providers own credential checking end to end. They report expected
//! rejections as [`SignInError::Auth`] with a discriminant and anything they
//! cannot classify as [`SignInError::Unexpected`].

use async_trait::async_trait;

use crate::domain::{
    AuthError, Error, LoginCredentials, SignInError, SignInForm, SignInStrategy, UserId,
};

/// Port for signing a user in with a given strategy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Attempt sign-in and return the authenticated user id.
    async fn sign_in(
        &self,
        strategy: SignInStrategy,
        form: &SignInForm,
    ) -> Result<UserId, SignInError>;
}

const FIXTURE_EMAIL: &str = "user@nextmail.com";
const FIXTURE_PASSWORD: &str = "123456";
const FIXTURE_USER_ID: &str = "410544b2-4001-4271-9855-fec4b6a6442a";

/// In-memory provider that knows a single demo account.
///
/// `user@nextmail.com` / `123456` signs in. Malformed or non-matching
/// credentials are rejected as `CredentialsSignin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_in(
        &self,
        strategy: SignInStrategy,
        form: &SignInForm,
    ) -> Result<UserId, SignInError> {
        match strategy {
            SignInStrategy::Credentials => {}
        }

        let credentials = LoginCredentials::try_from_form(form)
            .map_err(|err| AuthError::credentials_signin(err.to_string()))?;
        if credentials.email() != FIXTURE_EMAIL || credentials.password() != FIXTURE_PASSWORD {
            return Err(AuthError::credentials_signin("no matching account").into());
        }

        UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")).into())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::AuthErrorType;
    use rstest::rstest;
    use zeroize::Zeroizing;

    fn form(email: &str, password: &str) -> SignInForm {
        SignInForm {
            email: Some(email.to_owned()),
            password: Some(Zeroizing::new(password.to_owned())),
            redirect_to: None,
        }
    }

    #[tokio::test]
    async fn demo_account_signs_in() {
        let id = FixtureIdentityProvider
            .sign_in(SignInStrategy::Credentials, &form("user@nextmail.com", "123456"))
            .await
            .expect("demo account");
        assert_eq!(id.as_ref(), FIXTURE_USER_ID);
    }

    #[rstest]
    #[case("user@nextmail.com", "654321")]
    #[case("other@nextmail.com", "123456")]
    #[case("user", "123456")]
    #[case("user@nextmail.com", "123")]
    #[tokio::test]
    async fn other_credentials_are_rejected(#[case] email: &str, #[case] password: &str) {
        let err = FixtureIdentityProvider
            .sign_in(SignInStrategy::Credentials, &form(email, password))
            .await
            .expect_err("rejected");
        match err {
            SignInError::Auth(auth) => assert_eq!(auth.kind(), AuthErrorType::CredentialsSignin),
            SignInError::Unexpected(other) => panic!("expected auth error, got {other:?}"),
        }
    }
}

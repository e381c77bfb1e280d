//! Sign-in primitives shared by the authenticator and identity providers.
//!
//! Keep inbound payload parsing outside the domain: handlers build a
//! [`SignInForm`] from whatever they received and hand it over untouched.
//! Identity providers decide whether the credentials are well-formed.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use super::{Error, UserId};

/// Message shown when the identity provider rejected the credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";
/// Message shown for any other recognised authentication failure.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Something went wrong.";

const PASSWORD_MIN_LEN: usize = 6;

/// Raw sign-in submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    /// Submitted email address.
    pub email: Option<String>,
    /// Submitted password, wiped from memory on drop.
    pub password: Option<Zeroizing<String>>,
    /// Where to navigate after a successful sign-in.
    pub redirect_to: Option<String>,
}

/// Strategy requested from the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SignInStrategy {
    /// Email and password checked by the provider.
    Credentials,
}

impl SignInStrategy {
    /// Provider-facing name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
        }
    }
}

/// Domain error returned when credential values are malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or is not an address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was missing or too short.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Well-formed credentials extracted from a [`SignInForm`].
///
/// ## Invariants
/// - `email` is trimmed and contains an `@` with text on both sides.
/// - `password` is at least six characters and keeps caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" user@nextmail.com ", "123456").unwrap();
/// assert_eq!(creds.email(), "user@nextmail.com");
/// assert!(LoginCredentials::try_from_parts("user", "123456").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(LoginValidationError::InvalidEmail),
        }

        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(LoginValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Extract credentials from a raw sign-in form.
    pub fn try_from_form(form: &SignInForm) -> Result<Self, LoginValidationError> {
        let email = form.email.as_deref().unwrap_or_default();
        let password = form.password.as_ref().map_or("", |value| value.as_str());
        Self::try_from_parts(email, password)
    }

    /// Email address used for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Discriminant of a recognised authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AuthErrorType {
    /// The supplied credentials were rejected.
    CredentialsSignin,
    /// The account is not allowed to sign in.
    AccessDenied,
    /// The provider callback failed.
    CallbackRouteError,
    /// The provider is misconfigured.
    Configuration,
    /// A verification token was invalid or expired.
    Verification,
}

impl AuthErrorType {
    /// Stable discriminant string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CredentialsSignin => "CredentialsSignin",
            Self::AccessDenied => "AccessDenied",
            Self::CallbackRouteError => "CallbackRouteError",
            Self::Configuration => "Configuration",
            Self::Verification => "Verification",
        }
    }
}

impl fmt::Display for AuthErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a discriminant string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised authentication error type: {0}")]
pub struct UnknownAuthErrorType(String);

impl FromStr for AuthErrorType {
    type Err = UnknownAuthErrorType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CredentialsSignin" => Ok(Self::CredentialsSignin),
            "AccessDenied" => Ok(Self::AccessDenied),
            "CallbackRouteError" => Ok(Self::CallbackRouteError),
            "Configuration" => Ok(Self::Configuration),
            "Verification" => Ok(Self::Verification),
            other => Err(UnknownAuthErrorType(other.to_owned())),
        }
    }
}

/// Recognised authentication failure raised by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("authentication failed ({kind}): {message}")]
pub struct AuthError {
    kind: AuthErrorType,
    message: String,
}

impl AuthError {
    /// Build an error with the given discriminant.
    pub fn new(kind: AuthErrorType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a [`AuthErrorType::CredentialsSignin`] failure.
    pub fn credentials_signin(message: impl Into<String>) -> Self {
        Self::new(AuthErrorType::CredentialsSignin, message)
    }

    /// The discriminant consumers branch on.
    pub fn kind(&self) -> AuthErrorType {
        self.kind
    }

    /// Provider-supplied detail, never shown to users.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Failure returned by [`crate::domain::ports::IdentityProvider::sign_in`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignInError {
    /// A recognised authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Anything the provider did not classify.
    #[error(transparent)]
    Unexpected(#[from] Error),
}

/// Result of a sign-in attempt that did not fail unexpectedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The user is authenticated.
    SignedIn(UserId),
    /// The credentials were rejected.
    InvalidCredentials,
    /// Another recognised authentication failure occurred.
    Failed,
}

impl SignInOutcome {
    /// Message to display, or `None` when sign-in succeeded.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::SignInOutcome;
    ///
    /// assert_eq!(SignInOutcome::InvalidCredentials.message(), Some("Invalid credentials."));
    /// assert_eq!(SignInOutcome::Failed.message(), Some("Something went wrong."));
    /// ```
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::SignedIn(_) => None,
            Self::InvalidCredentials => Some(INVALID_CREDENTIALS_MESSAGE),
            Self::Failed => Some(SIGN_IN_FAILED_MESSAGE),
        }
    }
}

//! Domain primitives, services and ports.
//!
//! Purpose: Define the strongly typed invoice and sign-in model used by the
//! HTTP and persistence adapters, plus the services that implement the
//! driving ports. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - InvoiceActionService: create/update/delete dispatcher.
//! - CredentialAuthenticator: sign-in through an identity provider.
//! - validate_invoice_form: raw form to typed fields or field errors.

pub mod auth;
pub mod credential_authenticator;
pub mod error;
pub mod form_state;
pub mod invoice;
pub mod invoice_actions;
pub mod invoice_form;
pub mod ports;
pub mod user;
pub mod view;

pub use self::auth::{
    AuthError, AuthErrorType, INVALID_CREDENTIALS_MESSAGE, LoginCredentials,
    LoginValidationError, SIGN_IN_FAILED_MESSAGE, SignInError, SignInForm, SignInOutcome,
    SignInStrategy, UnknownAuthErrorType,
};
pub use self::credential_authenticator::CredentialAuthenticator;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::form_state::InvoiceFormState;
pub use self::invoice::{
    AmountInCents, CustomerId, IdentifierValidationError, InvoiceChanges, InvoiceId,
    InvoiceStatus, NewInvoice, NonPositiveAmountError, ParseInvoiceStatusError,
};
pub use self::invoice_actions::{InvoiceActionError, InvoiceActionService, InvoiceOperation};
pub use self::invoice_form::{
    AMOUNT_MESSAGE, CUSTOMER_MESSAGE, InvoiceField, InvoiceFieldErrors, InvoiceFormInput,
    STATUS_MESSAGE, ValidatedInvoiceFields, to_minor_units, validate_invoice_form,
};
pub use self::user::{UserId, UserValidationError};
pub use self::view::{
    DASHBOARD_VIEW_PATH, INVOICES_VIEW_PATH, Redirect, ViewPath, ViewPathValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use dashboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

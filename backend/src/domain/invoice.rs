//! Invoice aggregate primitives.
//!
//! Identifiers are opaque to the domain: any non-empty, trimmed string is
//! accepted and storage adapters decide how to map it onto their key types.
//! Amounts are kept in integer minor units so no floating point value ever
//! reaches the store.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by the invoice identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierValidationError {
    /// Value was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// Value carried leading or trailing whitespace.
    #[error("identifier must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

fn validate_identifier(raw: &str) -> Result<(), IdentifierValidationError> {
    if raw.trim().is_empty() {
        return Err(IdentifierValidationError::Empty);
    }
    if raw.trim() != raw {
        return Err(IdentifierValidationError::SurroundingWhitespace);
    }
    Ok(())
}

macro_rules! opaque_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdentifierValidationError> {
                let raw = value.into();
                validate_identifier(&raw)?;
                Ok(Self(raw))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

opaque_identifier! {
    /// Identifier of a stored invoice.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::InvoiceId;
    ///
    /// let id = InvoiceId::new("cc27c14a-0acf-4f4a-a6c9-d45682c144b9").expect("valid id");
    /// assert_eq!(id.as_str(), "cc27c14a-0acf-4f4a-a6c9-d45682c144b9");
    /// assert!(InvoiceId::new("  ").is_err());
    /// ```
    InvoiceId
}

opaque_identifier! {
    /// Reference to the customer an invoice is billed to.
    CustomerId
}

/// Error returned when parsing an [`InvoiceStatus`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invoice status: {0}")]
pub struct ParseInvoiceStatusError(String);

/// Closed set of invoice states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting payment.
    Pending,
    /// Settled.
    Paid,
}

impl InvoiceStatus {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ParseInvoiceStatusError;

    /// Parse the exact lowercase wire name; no trimming or case folding.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(ParseInvoiceStatusError(other.to_owned())),
        }
    }
}

/// Positive amount expressed in minor currency units (cents).
///
/// ## Invariants
/// - The value is strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AmountInCents(i64);

/// Error returned when an [`AmountInCents`] would not be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("amount must be greater than zero cents, got {0}")]
pub struct NonPositiveAmountError(i64);

impl AmountInCents {
    /// Construct a positive amount.
    pub fn new(cents: i64) -> Result<Self, NonPositiveAmountError> {
        if cents <= 0 {
            return Err(NonPositiveAmountError(cents));
        }
        Ok(Self(cents))
    }

    /// Raw number of cents.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<AmountInCents> for i64 {
    fn from(value: AmountInCents) -> Self {
        value.0
    }
}

impl TryFrom<i64> for AmountInCents {
    type Error = NonPositiveAmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Insert payload for a new invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    /// Customer billed.
    pub customer_id: CustomerId,
    /// Amount in cents.
    pub amount: AmountInCents,
    /// Payment status.
    pub status: InvoiceStatus,
    /// Issue date, computed by the server in UTC.
    pub date: NaiveDate,
}

/// Overwrite payload for an existing invoice. The issue date is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    /// Customer billed.
    pub customer_id: CustomerId,
    /// Amount in cents.
    pub amount: AmountInCents,
    /// Payment status.
    pub status: InvoiceStatus,
}

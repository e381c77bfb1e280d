//! Validation of raw invoice form submissions.
//!
//! The form arrives as loosely typed text. [`validate_invoice_form`] checks
//! every field, collects all violations, and either yields
//! [`ValidatedInvoiceFields`] or an [`InvoiceFieldErrors`] map suitable for
//! inline rendering next to each input.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::invoice::{AmountInCents, CustomerId, InvoiceChanges, InvoiceStatus, NewInvoice};

/// Message shown when no customer was selected.
pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
/// Message shown when the amount is missing, non-numeric, or not positive.
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
/// Message shown when the status is not one of the known states.
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Raw invoice fields as submitted by the dashboard form.
///
/// `id` and `date` are never read from the form: the identifier comes from
/// the route and the date is computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFormInput {
    /// Selected customer identifier.
    pub customer_id: Option<String>,
    /// Amount in major currency units, as typed.
    pub amount: Option<String>,
    /// Requested status, `pending` or `paid`.
    pub status: Option<String>,
}

/// Name of a validated invoice form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceField {
    /// The `customerId` field.
    CustomerId,
    /// The `amount` field.
    Amount,
    /// The `status` field.
    Status,
}

impl InvoiceField {
    /// Field name as used by the form and the serialised error map.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomerId => "customerId",
            Self::Amount => "amount",
            Self::Status => "status",
        }
    }
}

/// Per-field validation messages, in the order they were raised.
///
/// Fields without violations are omitted from the serialised form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFieldErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    customer_id: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    amount: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    status: Vec<String>,
}

impl InvoiceFieldErrors {
    /// Record a violation against `field`.
    pub fn push(&mut self, field: InvoiceField, message: impl Into<String>) {
        self.slot_mut(field).push(message.into());
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: InvoiceField) -> &[String] {
        match field {
            InvoiceField::CustomerId => &self.customer_id,
            InvoiceField::Amount => &self.amount,
            InvoiceField::Status => &self.status,
        }
    }

    /// Whether no violation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_empty() && self.amount.is_empty() && self.status.is_empty()
    }

    fn slot_mut(&mut self, field: InvoiceField) -> &mut Vec<String> {
        match field {
            InvoiceField::CustomerId => &mut self.customer_id,
            InvoiceField::Amount => &mut self.amount,
            InvoiceField::Status => &mut self.status,
        }
    }
}

/// Strongly typed invoice fields that passed validation.
///
/// ## Invariants
/// - `amount` is positive and converts to at least one whole cent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvoiceFields {
    customer_id: CustomerId,
    amount: Decimal,
    amount_in_cents: AmountInCents,
    status: InvoiceStatus,
}

impl ValidatedInvoiceFields {
    /// Selected customer.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Amount in major units, exactly as submitted.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount converted to minor units.
    pub fn amount_in_cents(&self) -> AmountInCents {
        self.amount_in_cents
    }

    /// Selected status.
    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Build the insert payload for a new invoice issued on `date`.
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount: self.amount_in_cents,
            status: self.status,
            date,
        }
    }

    /// Build the overwrite payload for an existing invoice.
    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount: self.amount_in_cents,
            status: self.status,
        }
    }
}

/// Convert a major-unit amount into positive minor units.
///
/// Sub-cent fractions round half away from zero. Returns `None` when the
/// result would not be positive or does not fit in an `i64`.
///
/// # Examples
/// ```
/// use dashboard::domain::to_minor_units;
/// use rust_decimal::Decimal;
///
/// let cents = to_minor_units(Decimal::new(1250, 2)).expect("convertible");
/// assert_eq!(cents.get(), 1250);
/// assert!(to_minor_units(Decimal::new(1, 3)).is_none());
/// ```
pub fn to_minor_units(amount: Decimal) -> Option<AmountInCents> {
    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()?;
    AmountInCents::new(cents).ok()
}

/// Coerce submitted amount text into a number, treating absence as zero.
fn coerce_amount(raw: Option<&str>) -> Option<Decimal> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(trimmed).ok()
}

fn validate_customer(raw: Option<&str>) -> Option<CustomerId> {
    let trimmed = raw.map(str::trim).filter(|value| !value.is_empty())?;
    CustomerId::new(trimmed).ok()
}

fn validate_amount(raw: Option<&str>) -> Option<(Decimal, AmountInCents)> {
    let amount =
        coerce_amount(raw).filter(|amount| amount.is_sign_positive() && !amount.is_zero())?;
    to_minor_units(amount).map(|cents| (amount, cents))
}

fn validate_status(raw: Option<&str>) -> Option<InvoiceStatus> {
    raw.and_then(|value| InvoiceStatus::from_str(value).ok())
}

/// Validate a raw invoice form.
///
/// All three fields are checked on every call so the caller can render
/// every violation at once.
///
/// # Examples
/// ```
/// use dashboard::domain::{InvoiceField, InvoiceFormInput, validate_invoice_form};
///
/// let input = InvoiceFormInput {
///     customer_id: Some("c1".into()),
///     amount: Some("12.50".into()),
///     status: Some("paid".into()),
/// };
/// let fields = validate_invoice_form(&input).expect("valid form");
/// assert_eq!(fields.amount_in_cents().get(), 1250);
///
/// let errors = validate_invoice_form(&InvoiceFormInput::default()).expect_err("empty form");
/// assert_eq!(errors.get(InvoiceField::Amount).len(), 1);
/// ```
pub fn validate_invoice_form(
    input: &InvoiceFormInput,
) -> Result<ValidatedInvoiceFields, InvoiceFieldErrors> {
    let customer_id = validate_customer(input.customer_id.as_deref());
    let amount = validate_amount(input.amount.as_deref());
    let status = validate_status(input.status.as_deref());

    match (customer_id, amount, status) {
        (Some(customer_id), Some((amount, amount_in_cents)), Some(status)) => {
            Ok(ValidatedInvoiceFields {
                customer_id,
                amount,
                amount_in_cents,
                status,
            })
        }
        (customer_id, amount, status) => {
            let mut errors = InvoiceFieldErrors::default();
            if customer_id.is_none() {
                errors.push(InvoiceField::CustomerId, CUSTOMER_MESSAGE);
            }
            if amount.is_none() {
                errors.push(InvoiceField::Amount, AMOUNT_MESSAGE);
            }
            if status.is_none() {
                errors.push(InvoiceField::Status, STATUS_MESSAGE);
            }
            Err(errors)
        }
    }
}

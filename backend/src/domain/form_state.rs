//! Caller-facing result of a rejected invoice action.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::invoice_form::InvoiceFieldErrors;

/// Form state handed back to the dashboard instead of navigating.
///
/// A fresh value is built for every rejected invocation and is never
/// persisted.
///
/// # Examples
/// ```
/// use dashboard::domain::InvoiceFormState;
///
/// let state = InvoiceFormState::message_only("Database Error: Failed to Delete Invoice");
/// assert!(state.errors.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormState {
    /// Per-field validation messages, absent when validation passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<InvoiceFieldErrors>,
    /// Summary shown above the form.
    #[serde(default)]
    #[schema(example = "Missing Fields. Failed to Create Invoice.")]
    pub message: Option<String>,
}

impl InvoiceFormState {
    /// State carrying field errors and a summary message.
    pub fn with_errors(errors: InvoiceFieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    /// State carrying only a summary message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    /// Whether the state carries field-level errors.
    pub fn has_field_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}

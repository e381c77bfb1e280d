//! Driving port for invoice form actions.
//!
//! Inbound adapters hand raw form input to [`InvoiceCommand`] and render
//! whatever comes back: a [`Redirect`] when the action went through, or the
//! [`InvoiceFormState`] to show next to the form when it did not. Neither
//! branch is an error from the adapter's point of view.

use async_trait::async_trait;

use crate::domain::{InvoiceFormInput, InvoiceFormState, InvoiceId, Redirect};

/// Driving port for creating, updating and deleting invoices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceCommand: Send + Sync {
    /// Validate `input` and insert a new invoice dated today.
    async fn create(&self, input: InvoiceFormInput) -> Result<Redirect, InvoiceFormState>;

    /// Validate `input` and overwrite the invoice with `id`.
    async fn update(
        &self,
        id: &InvoiceId,
        input: InvoiceFormInput,
    ) -> Result<Redirect, InvoiceFormState>;

    /// Delete the invoice with `id` and refresh the listing.
    ///
    /// Delete is invoked from the listing itself, so success carries no
    /// navigation.
    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceFormState>;
}

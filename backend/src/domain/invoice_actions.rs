//! Invoice form actions.
//!
//! [`InvoiceActionService`] implements the [`InvoiceCommand`] driving port.
//! Every action runs the same pipeline: validate the raw form, perform one
//! repository write, then invalidate the invoice listing and (for create and
//! update) navigate back to it. A failure at any stage ends the action with
//! an [`InvoiceFormState`] and skips the remaining stages.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    InvoiceCommand, InvoicePersistenceError, InvoiceRepository, Navigator, ViewCache,
};
use crate::domain::{
    InvoiceFieldErrors, InvoiceFormInput, InvoiceFormState, InvoiceId, Redirect,
    ValidatedInvoiceFields, ViewPath, validate_invoice_form,
};

/// Kind of write an action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceOperation {
    /// Insert a new invoice.
    Create,
    /// Overwrite an existing invoice.
    Update,
    /// Remove an invoice.
    Delete,
}

impl InvoiceOperation {
    /// Capitalised verb used in caller-facing messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for InvoiceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an invoice action stopped before completing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvoiceActionError {
    /// The form failed validation; nothing was written.
    #[error("invoice form rejected for {operation}")]
    Validation {
        /// Action that was attempted.
        operation: InvoiceOperation,
        /// Messages per rejected field.
        errors: InvoiceFieldErrors,
    },
    /// The repository write failed.
    #[error("invoice {operation} failed: {source}")]
    Persistence {
        /// Action that was attempted.
        operation: InvoiceOperation,
        /// Error reported by the repository.
        #[source]
        source: InvoicePersistenceError,
    },
}

impl InvoiceActionError {
    /// Operation the failure belongs to.
    pub fn operation(&self) -> InvoiceOperation {
        match self {
            Self::Validation { operation, .. } | Self::Persistence { operation, .. } => *operation,
        }
    }
}

impl From<InvoiceActionError> for InvoiceFormState {
    /// Collapse the failure into what the form shows.
    ///
    /// Persistence causes are dropped: the caller only ever sees the
    /// per-operation summary.
    fn from(value: InvoiceActionError) -> Self {
        match value {
            InvoiceActionError::Validation { operation, errors } => Self::with_errors(
                errors,
                format!("Missing Fields. Failed to {operation} Invoice."),
            ),
            InvoiceActionError::Persistence { operation, .. } => {
                Self::message_only(format!("Database Error: Failed to {operation} Invoice"))
            }
        }
    }
}

/// Invoice action dispatcher implementing [`InvoiceCommand`].
#[derive(Clone)]
pub struct InvoiceActionService<R: ?Sized, C: ?Sized, N: ?Sized> {
    repository: Arc<R>,
    cache: Arc<C>,
    navigator: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, C: ?Sized, N: ?Sized> InvoiceActionService<R, C, N> {
    /// Create a dispatcher over the given collaborators.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<C>,
        navigator: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            cache,
            navigator,
            clock,
        }
    }
}

impl<R, C, N> InvoiceActionService<R, C, N>
where
    R: InvoiceRepository + ?Sized,
    C: ViewCache + ?Sized,
    N: Navigator + ?Sized,
{
    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    fn validate(
        operation: InvoiceOperation,
        input: &InvoiceFormInput,
    ) -> Result<ValidatedInvoiceFields, InvoiceActionError> {
        validate_invoice_form(input).map_err(|errors| {
            debug!(%operation, "invoice form failed validation");
            InvoiceActionError::Validation { operation, errors }
        })
    }

    fn persistence_failure(
        operation: InvoiceOperation,
        invoice_id: Option<&InvoiceId>,
        source: InvoicePersistenceError,
    ) -> InvoiceActionError {
        error!(
            %operation,
            invoice_id = invoice_id.map(InvoiceId::as_str),
            error = %source,
            "invoice write failed"
        );
        InvoiceActionError::Persistence { operation, source }
    }

    async fn refresh_listing(&self) -> ViewPath {
        let listing = ViewPath::invoices();
        self.cache.invalidate(&listing).await;
        listing
    }

    async fn run_create(&self, input: InvoiceFormInput) -> Result<Redirect, InvoiceActionError> {
        let operation = InvoiceOperation::Create;
        let invoice = Self::validate(operation, &input)?.into_new_invoice(self.today());
        self.repository
            .insert(&invoice)
            .await
            .map_err(|source| Self::persistence_failure(operation, None, source))?;

        let listing = self.refresh_listing().await;
        Ok(self.navigator.redirect(&listing))
    }

    async fn run_update(
        &self,
        id: &InvoiceId,
        input: InvoiceFormInput,
    ) -> Result<Redirect, InvoiceActionError> {
        let operation = InvoiceOperation::Update;
        let changes = Self::validate(operation, &input)?.into_changes();
        self.repository
            .update(id, &changes)
            .await
            .map_err(|source| Self::persistence_failure(operation, Some(id), source))?;

        let listing = self.refresh_listing().await;
        Ok(self.navigator.redirect(&listing))
    }

    async fn run_delete(&self, id: &InvoiceId) -> Result<(), InvoiceActionError> {
        let operation = InvoiceOperation::Delete;
        self.repository
            .delete(id)
            .await
            .map_err(|source| Self::persistence_failure(operation, Some(id), source))?;

        self.refresh_listing().await;
        Ok(())
    }
}

#[async_trait]
impl<R, C, N> InvoiceCommand for InvoiceActionService<R, C, N>
where
    R: InvoiceRepository + ?Sized,
    C: ViewCache + ?Sized,
    N: Navigator + ?Sized,
{
    async fn create(&self, input: InvoiceFormInput) -> Result<Redirect, InvoiceFormState> {
        self.run_create(input).await.map_err(InvoiceFormState::from)
    }

    async fn update(
        &self,
        id: &InvoiceId,
        input: InvoiceFormInput,
    ) -> Result<Redirect, InvoiceFormState> {
        self.run_update(id, input)
            .await
            .map_err(InvoiceFormState::from)
    }

    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceFormState> {
        self.run_delete(id).await.map_err(InvoiceFormState::from)
    }
}

#[cfg(test)]
#[path = "invoice_actions_tests.rs"]
mod tests;

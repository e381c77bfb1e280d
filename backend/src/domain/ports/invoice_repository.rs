//! Driven port for invoice persistence.
//!
//! Each operation maps onto exactly one autocommit statement. None of them
//! checks for existence first: updating or deleting an unknown invoice
//! succeeds without touching any row.

use async_trait::async_trait;

use crate::domain::{InvoiceChanges, InvoiceId, NewInvoice};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by invoice repository adapters.
    pub enum InvoicePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "invoice repository connection failed: {message}",
        /// Statement failed during execution.
        Query { message: String } => "invoice repository query failed: {message}",
        /// An identifier could not be represented in the store's key type.
        InvalidIdentifier { field: String, value: String } =>
            "invoice repository cannot store {field} value {value:?}",
    }
}

/// Port for invoice writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice row.
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), InvoicePersistenceError>;

    /// Overwrite customer, amount and status of the invoice with `id`.
    async fn update(
        &self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), InvoicePersistenceError>;

    /// Remove the invoice with `id`.
    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoicePersistenceError>;
}

/// Fixture implementation that accepts every write without storing it.
///
/// Used when the server runs without a database URL and in tests where
/// persistence behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInvoiceRepository;

#[async_trait]
impl InvoiceRepository for FixtureInvoiceRepository {
    async fn insert(&self, _invoice: &NewInvoice) -> Result<(), InvoicePersistenceError> {
        Ok(())
    }

    async fn update(
        &self,
        _id: &InvoiceId,
        _changes: &InvoiceChanges,
    ) -> Result<(), InvoicePersistenceError> {
        Ok(())
    }

    async fn delete(&self, _id: &InvoiceId) -> Result<(), InvoicePersistenceError> {
        Ok(())
    }
}

//! PostgreSQL-backed `InvoiceRepository` implementation using Diesel ORM.
//!
//! Every write is one autocommit statement with bound parameters. Updates
//! and deletes that match no row succeed; the miss is only logged.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{InvoicePersistenceError, InvoiceRepository};
use crate::domain::{InvoiceChanges, InvoiceId, NewInvoice};

use super::models::{InvoiceChangeset, NewInvoiceRow};
use super::pool::{DbPool, PoolError};
use super::schema::invoices;

/// Diesel-backed implementation of the `InvoiceRepository` port.
#[derive(Clone)]
pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InvoicePersistenceError {
    InvoicePersistenceError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> InvoicePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            InvoicePersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            InvoicePersistenceError::query("referenced customer does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            InvoicePersistenceError::query("invoice violates a table constraint")
        }
        DieselError::QueryBuilderError(_) => InvoicePersistenceError::query("database query error"),
        _ => InvoicePersistenceError::query("database error"),
    }
}

/// Parse an opaque domain identifier into the column's UUID type.
fn parse_key(field: &'static str, value: &str) -> Result<Uuid, InvoicePersistenceError> {
    Uuid::parse_str(value).map_err(|_| InvoicePersistenceError::invalid_identifier(field, value))
}

#[async_trait]
impl InvoiceRepository for DieselInvoiceRepository {
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), InvoicePersistenceError> {
        let row = NewInvoiceRow {
            customer_id: parse_key("customer_id", invoice.customer_id.as_str())?,
            amount: invoice.amount.get(),
            status: invoice.status.as_str(),
            date: invoice.date,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(invoices::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), InvoicePersistenceError> {
        let key = parse_key("id", id.as_str())?;
        let changeset = InvoiceChangeset {
            customer_id: parse_key("customer_id", changes.customer_id.as_str())?,
            amount: changes.amount.get(),
            status: changes.status.as_str(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(invoices::table.filter(invoices::id.eq(key)))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            debug!(invoice_id = %id, "update matched no invoice");
        }
        Ok(())
    }

    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoicePersistenceError> {
        let key = parse_key("id", id.as_str())?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(invoices::table.filter(invoices::id.eq(key)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            debug!(invoice_id = %id, "delete matched no invoice");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Error-mapping coverage; statement behaviour is exercised against a
    //! live database in `tests/diesel_invoice_repository.rs`.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out waiting for connection"));
        assert_eq!(
            error,
            InvoicePersistenceError::connection("timed out waiting for connection")
        );
    }

    #[rstest]
    #[case(DatabaseErrorKind::ClosedConnection, "database connection error", true)]
    #[case(DatabaseErrorKind::ForeignKeyViolation, "referenced customer does not exist", false)]
    #[case(DatabaseErrorKind::CheckViolation, "invoice violates a table constraint", false)]
    #[case(DatabaseErrorKind::UniqueViolation, "database error", false)]
    fn database_errors_are_classified(
        #[case] kind: DatabaseErrorKind,
        #[case] message: &str,
        #[case] is_connection: bool,
    ) {
        let error = map_diesel_error(DieselError::DatabaseError(
            kind,
            Box::new("driver detail".to_owned()),
        ));
        let expected = if is_connection {
            InvoicePersistenceError::connection(message)
        } else {
            InvoicePersistenceError::query(message)
        };
        assert_eq!(error, expected);
    }

    #[rstest]
    fn driver_detail_is_not_carried_over() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::SerializationFailure,
            Box::new("password authentication failed for user".to_owned()),
        ));
        assert!(!error.to_string().contains("password"));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("c1")]
    fn non_uuid_identifiers_are_rejected(#[case] raw: &str) {
        assert_eq!(
            parse_key("customer_id", raw),
            Err(InvoicePersistenceError::invalid_identifier("customer_id", raw))
        );
    }

    #[rstest]
    fn uuid_identifiers_parse() {
        let raw = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
        let expected = Uuid::parse_str(raw).expect("valid uuid");
        assert_eq!(parse_key("id", raw), Ok(expected));
    }
}

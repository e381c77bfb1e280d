//! Internal Diesel row structs for invoice writes.
//!
//! These never leave the persistence layer.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::invoices;

/// Insertable invoice row; `id` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub(crate) struct NewInvoiceRow<'a> {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: &'a str,
    pub date: NaiveDate,
}

/// Columns overwritten by an invoice update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
pub(crate) struct InvoiceChangeset<'a> {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: &'a str,
}

//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Invoices issued to customers.
    invoices (id) {
        /// Primary key, generated by the database.
        id -> Uuid,
        customer_id -> Uuid,
        /// Amount in cents.
        amount -> Int8,
        /// `pending` or `paid`.
        status -> Varchar,
        /// Issue date, UTC calendar day.
        date -> Date,
    }
}

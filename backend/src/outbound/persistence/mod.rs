//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories run on `diesel-async` connections checked out of a `bb8`
//! pool. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; only domain types cross the port.
//!
//! # Example
//!
//! ```no_run
//! use dashboard::outbound::persistence::{DbPool, DieselInvoiceRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), dashboard::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/dashboard")).await?;
//! let repository = DieselInvoiceRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_invoice_repository;
mod models;
mod pool;
mod schema;

pub use diesel_invoice_repository::DieselInvoiceRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

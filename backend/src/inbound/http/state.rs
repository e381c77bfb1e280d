//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{InvoiceCommand, SignInCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Invoice form actions.
    pub invoices: Arc<dyn InvoiceCommand>,
    /// Credential sign-in.
    pub sign_in: Arc<dyn SignInCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(invoices: Arc<dyn InvoiceCommand>, sign_in: Arc<dyn SignInCommand>) -> Self {
        Self { invoices, sign_in }
    }
}

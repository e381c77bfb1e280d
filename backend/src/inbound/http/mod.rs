//! HTTP inbound adapter for the dashboard forms.

pub mod error;
pub mod invoices;
pub mod login;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

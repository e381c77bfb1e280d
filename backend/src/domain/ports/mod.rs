//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`InvoiceCommand`], [`SignInCommand`]) are what inbound
//! adapters call. Driven ports ([`InvoiceRepository`], [`ViewCache`],
//! [`Navigator`], [`IdentityProvider`]) are what the domain services call.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod invoice_command;
mod invoice_repository;
mod navigator;
mod sign_in_command;
mod view_cache;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider};
#[cfg(test)]
pub use invoice_command::MockInvoiceCommand;
pub use invoice_command::InvoiceCommand;
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
pub use invoice_repository::{
    FixtureInvoiceRepository, InvoicePersistenceError, InvoiceRepository,
};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{Navigator, ServerNavigator};
#[cfg(test)]
pub use sign_in_command::MockSignInCommand;
pub use sign_in_command::SignInCommand;
#[cfg(test)]
pub use view_cache::MockViewCache;
pub use view_cache::{NoOpViewCache, ViewCache};

//! Builders wiring ports to adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use dashboard::domain::ports::{
    FixtureIdentityProvider, FixtureInvoiceRepository, InvoiceRepository, ServerNavigator,
    ViewCache,
};
use dashboard::domain::{CredentialAuthenticator, InvoiceActionService};
use dashboard::inbound::http::state::HttpState;
use dashboard::outbound::cache::TracingViewCache;
use dashboard::outbound::persistence::DieselInvoiceRepository;

use super::ServerConfig;

/// Select the Diesel repository when a pool is configured, otherwise the
/// fixture that accepts every write.
fn build_invoice_repository(config: &ServerConfig) -> Arc<dyn InvoiceRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselInvoiceRepository::new(pool.clone())),
        None => Arc::new(FixtureInvoiceRepository),
    }
}

fn build_view_cache(config: &ServerConfig) -> Arc<dyn ViewCache> {
    match &config.view_cache {
        Some(cache) => Arc::new(cache.clone()),
        None => Arc::new(TracingViewCache),
    }
}

/// Build the shared HTTP state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let invoices = InvoiceActionService::new(
        build_invoice_repository(config),
        build_view_cache(config),
        Arc::new(ServerNavigator),
        Arc::new(DefaultClock),
    );
    let sign_in = CredentialAuthenticator::new(Arc::new(FixtureIdentityProvider));

    web::Data::new(HttpState::new(Arc::new(invoices), Arc::new(sign_in)))
}

//! Crate entrypoint wiring together configuration, the PowerDNS client, and the web UI.

pub mod config;
pub mod error;
pub mod powerdns;
pub mod search;
pub mod web;

use config::AppConfig;
use powerdns::client::PowerDnsClient;
use web::render::Templates;

use std::sync::Arc;

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub config: AppConfig,
    pub pdns: PowerDnsClient,
    pub templates: Templates,
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;

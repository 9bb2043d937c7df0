//! EventHub API
//!
//! A small web API for community events: create, list and filter, update,
//! join and delete. Events live in memory or in PostgreSQL behind a common
//! store contract, and all attendance rules are enforced inside the store's
//! critical section.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventHubError, Result};

// Re-export main components for easy access
pub use database::{EventStore, InMemoryEventStore, EventRepository};
pub use services::EventService;
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

/// Build the HTTP application for the given settings
pub async fn build_app(settings: &Settings) -> Result<axum::Router> {
    let state = AppState::from_settings(settings).await?;
    Ok(handlers::router(state))
}

//! Database module
//!
//! This module holds the event store contract and its in-memory and
//! PostgreSQL implementations.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

use std::sync::Arc;
use crate::config::{Settings, StorageBackend};
use crate::utils::errors::Result;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, run_migrations, health_check};
pub use memory::InMemoryEventStore;
pub use repositories::EventRepository;
pub use store::EventStore;

/// Build the event store selected in the settings
///
/// For PostgreSQL this connects and applies pending migrations.
pub async fn build_store(settings: &Settings) -> Result<Arc<dyn EventStore>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory event store");
            Ok(Arc::new(InMemoryEventStore::new()))
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(&settings.database).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(EventRepository::new(pool)))
        }
    }
}

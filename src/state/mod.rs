//! Application state shared by HTTP handlers

use std::sync::Arc;
use crate::config::Settings;
use crate::database::{self, EventStore};
use crate::services::EventService;
use crate::utils::errors::Result;

/// Application state, cloned cheaply into every request
#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, settings: &Settings) -> Self {
        Self {
            events: EventService::new(store, settings.events.host_auto_join),
        }
    }

    /// Build the state, including the configured store
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let store = database::build_store(settings).await?;
        Ok(Self::new(store, settings))
    }
}

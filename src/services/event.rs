//! Event service implementation
//!
//! This service runs each API operation end to end: payload validation,
//! the store call, and logging. Storage failures are logged here with their
//! full detail; callers only see the internal error category.

use std::sync::Arc;
use tracing::debug;
use crate::database::store::EventStore;
use crate::models::event::{CreateEventRequest, Event, EventQuery, JoinEventRequest, UpdateEventRequest};
use crate::services::filter;
use crate::utils::errors::{ErrorKind, EventHubError, Result};
use crate::utils::logging::{log_event_action, log_rejected_action, log_storage_failure};
use crate::validation;

/// Event service for managing event operations
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
    host_auto_join: bool,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(store: Arc<dyn EventStore>, host_auto_join: bool) -> Self {
        Self {
            store,
            host_auto_join,
        }
    }

    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Log an error from a store call according to its category
    fn observe(&self, operation: &str, event_id: Option<i64>, err: EventHubError) -> EventHubError {
        match err.kind() {
            ErrorKind::Internal => log_storage_failure(operation, &err.to_string(), event_id),
            ErrorKind::Conflict => log_rejected_action(event_id, operation, &err.to_string()),
            _ => {}
        }
        err
    }

    /// Create a new event
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let mut new_event = validation::validate_create(&request)?;
        if self.host_auto_join {
            new_event.attendees.push(new_event.host_instagram.clone());
        }

        let event = self
            .store
            .create(new_event)
            .await
            .map_err(|e| self.observe("create", None, e))?;

        log_event_action(event.id, "create", Some(&event.host_instagram), Some(&event.activity));
        Ok(event)
    }

    /// List events matching the query, earliest first
    pub async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        debug!(query = ?query, "Listing events");
        let events = self
            .store
            .find_all()
            .await
            .map_err(|e| self.observe("list", None, e))?;

        Ok(filter::filter_events(events, query))
    }

    /// Get event by ID
    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        debug!(event_id = event_id, "Getting event by ID");
        self.store
            .find_by_id(event_id)
            .await
            .map_err(|e| self.observe("get", Some(event_id), e))?
            .ok_or(EventHubError::EventNotFound { event_id })
    }

    /// Apply a partial update
    pub async fn update_event(&self, event_id: i64, request: UpdateEventRequest) -> Result<Event> {
        let patch = validation::validate_update(&request)?;

        let event = self
            .store
            .update(event_id, patch)
            .await
            .map_err(|e| self.observe("update", Some(event_id), e))?
            .ok_or(EventHubError::EventNotFound { event_id })?;

        log_event_action(event.id, "update", None, None);
        Ok(event)
    }

    /// Delete event
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        let deleted = self
            .store
            .delete(event_id)
            .await
            .map_err(|e| self.observe("delete", Some(event_id), e))?;

        if !deleted {
            return Err(EventHubError::EventNotFound { event_id });
        }

        log_event_action(event_id, "delete", None, None);
        Ok(())
    }

    /// Register a handle as attendee
    pub async fn join_event(&self, event_id: i64, request: JoinEventRequest) -> Result<Event> {
        let handle = validation::validate_join(&request)?;

        let event = self
            .store
            .join(event_id, &handle)
            .await
            .map_err(|e| self.observe("join", Some(event_id), e))?
            .ok_or(EventHubError::EventNotFound { event_id })?;

        log_event_action(
            event.id,
            "join",
            Some(&handle),
            Some(&format!("{} attendees", event.current_attendees())),
        );
        Ok(event)
    }

    /// Check the backing store
    pub async fn health_check(&self) -> Result<()> {
        self.store
            .health_check()
            .await
            .map_err(|e| self.observe("health_check", None, e))
    }
}

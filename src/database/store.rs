//! Event store contract
//!
//! Both backends implement [`EventStore`]. `update` and `join` are single
//! calls so each backend can run the read, the rule check and the write as
//! one atomic step.

use async_trait::async_trait;
use crate::models::event::{Event, EventPatch, NewEvent};
use crate::utils::errors::Result;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a new event and assign its id
    async fn create(&self, event: NewEvent) -> Result<Event>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;

    /// All events in id order
    async fn find_all(&self) -> Result<Vec<Event>>;

    /// Apply a patch; `Ok(None)` when the id is unknown
    async fn update(&self, id: i64, patch: EventPatch) -> Result<Option<Event>>;

    /// Remove an event; `false` when the id is unknown
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Append an attendee if the attendance rules allow it; `Ok(None)` when
    /// the id is unknown
    async fn join(&self, id: i64, handle: &str) -> Result<Option<Event>>;

    /// Check the backend is reachable
    async fn health_check(&self) -> Result<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

//! In-memory event store

use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::database::store::EventStore;
use crate::models::event::{Event, EventPatch, NewEvent};
use crate::services::attendance;
use crate::utils::errors::Result;

struct MemoryState {
    events: Vec<Event>,
    next_id: i64,
}

/// Event store backed by a vector behind a lock
///
/// Ids start at 1 and are never reused. Mutations hold the write lock from
/// lookup to write-back.
pub struct InMemoryEventStore {
    state: RwLock<MemoryState>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                events: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.state.read().await.events.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create(&self, event: NewEvent) -> Result<Event> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let event = event.into_event(id);
        state.events.push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let state = self.state.read().await;
        Ok(state.events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Event>> {
        Ok(self.state.read().await.events.clone())
    }

    async fn update(&self, id: i64, patch: EventPatch) -> Result<Option<Event>> {
        let mut state = self.state.write().await;
        let Some(stored) = state.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        let mut updated = stored.clone();
        attendance::apply_patch(&mut updated, patch)?;
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        Ok(state.events.len() != before)
    }

    async fn join(&self, id: i64, handle: &str) -> Result<Option<Event>> {
        let mut state = self.state.write().await;
        let Some(stored) = state.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        attendance::join(stored, handle)?;
        Ok(Some(stored.clone()))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

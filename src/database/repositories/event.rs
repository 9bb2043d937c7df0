//! Event repository implementation

use std::time::Instant;
use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::store::EventStore;
use crate::models::event::{Event, EventPatch, NewEvent};
use crate::services::attendance;
use crate::utils::errors::EventHubError;
use crate::utils::logging::log_database_operation;

const EVENT_COLUMNS: &str = "id, activity, date, location, host_instagram, capacity, attendees";

/// PostgreSQL-backed event store
///
/// Update and join lock the row with `SELECT ... FOR UPDATE` so concurrent
/// requests for the same event are serialized.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock an event row for the remainder of the transaction
    async fn lock_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: i64,
    ) -> Result<Option<Event>, EventHubError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1 FOR UPDATE",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(event)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, EventHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[async_trait]
impl EventStore for EventRepository {
    /// Create a new event
    async fn create(&self, event: NewEvent) -> Result<Event, EventHubError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (activity, date, location, host_instagram, capacity, attendees)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(event.activity)
        .bind(event.date)
        .bind(event.location)
        .bind(event.host_instagram)
        .bind(event.capacity)
        .bind(event.attendees)
        .fetch_one(&self.pool)
        .await;

        log_database_operation("insert", "events", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }

    /// Find event by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventHubError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List all events
    async fn find_all(&self) -> Result<Vec<Event>, EventHubError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events ORDER BY id ASC",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Update event
    async fn update(&self, id: i64, patch: EventPatch) -> Result<Option<Event>, EventHubError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        let Some(mut event) = Self::lock_for_update(&mut tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        // Dropping `tx` on error rolls the transaction back
        attendance::apply_patch(&mut event, patch)?;

        let updated = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET activity = $2,
                date = $3,
                location = $4,
                host_instagram = $5,
                capacity = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(&event.activity)
        .bind(event.date)
        .bind(&event.location)
        .bind(&event.host_instagram)
        .bind(event.capacity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        log_database_operation("update", "events", started.elapsed().as_millis() as u64, true);

        Ok(Some(updated))
    }

    /// Delete event
    async fn delete(&self, id: i64) -> Result<bool, EventHubError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Register an attendee for the event
    async fn join(&self, id: i64, handle: &str) -> Result<Option<Event>, EventHubError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        let Some(mut event) = Self::lock_for_update(&mut tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        attendance::join(&mut event, handle)?;

        let updated = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET attendees = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(&event.attendees)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        log_database_operation("join", "events", started.elapsed().as_millis() as u64, true);

        Ok(Some(updated))
    }

    async fn health_check(&self) -> Result<(), EventHubError> {
        crate::database::connection::health_check(&self.pool).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

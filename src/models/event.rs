//! Event model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::models::patch::Patch;
use crate::utils::helpers::format_timestamp;

/// Stored event record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Event {
    pub id: i64,
    pub activity: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub host_instagram: String,
    pub capacity: Option<i32>,
    pub attendees: Vec<String>,
}

impl Event {
    /// Number of attendees, derived on every read
    pub fn current_attendees(&self) -> usize {
        self.attendees.len()
    }

    /// Case-insensitive attendee lookup
    pub fn has_attendee(&self, handle: &str) -> bool {
        let handle = handle.to_lowercase();
        self.attendees.iter().any(|a| a.to_lowercase() == handle)
    }

    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(capacity) => self.current_attendees() >= capacity as usize,
            None => false,
        }
    }

    pub fn to_response(&self) -> EventResponse {
        EventResponse::from(self)
    }
}

/// Externally visible representation of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i64,
    pub activity: String,
    pub date: String,
    pub location: String,
    pub host_instagram: String,
    pub capacity: Option<i32>,
    pub attendees: Vec<String>,
    pub current_attendees: usize,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            activity: event.activity.clone(),
            date: format_timestamp(event.date),
            location: event.location.clone(),
            host_instagram: event.host_instagram.clone(),
            capacity: event.capacity,
            attendees: event.attendees.clone(),
            current_attendees: event.current_attendees(),
        }
    }
}

/// Validated input for a new event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub activity: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub host_instagram: String,
    pub capacity: Option<i32>,
    pub attendees: Vec<String>,
}

impl NewEvent {
    /// Attach the stored id
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            activity: self.activity,
            date: self.date,
            location: self.location,
            host_instagram: self.host_instagram,
            capacity: self.capacity,
            attendees: self.attendees,
        }
    }
}

/// Validated partial update
///
/// `capacity` keeps the absent/null distinction: `Null` lifts the limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub activity: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub host_instagram: Option<String>,
    pub capacity: Patch<i32>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.activity.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.host_instagram.is_none()
            && self.capacity.is_absent()
    }
}

/// Raw create payload; values are checked by the validation rules
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub activity: Option<Value>,
    pub date: Option<Value>,
    pub location: Option<Value>,
    pub instagram_username: Option<Value>,
    pub capacity: Option<Value>,
}

/// Raw update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub activity: Patch<Value>,
    #[serde(default)]
    pub date: Patch<Value>,
    #[serde(default)]
    pub location: Patch<Value>,
    #[serde(default)]
    pub instagram_username: Patch<Value>,
    #[serde(default)]
    pub capacity: Patch<Value>,
}

/// Raw join payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEventRequest {
    pub instagram_username: Option<Value>,
}

/// Query string of the list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventQuery {
    pub activity: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

impl EventQuery {
    /// Build from decoded key/value pairs; a repeated key keeps its first value
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = EventQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "activity" => &mut query.activity,
                "location" => &mut query.location,
                "date" => &mut query.date,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

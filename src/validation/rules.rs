//! Validation rules per operation
//!
//! Raw payloads arrive as loosely typed JSON. Each rule either produces a
//! fully checked value or an [`EventHubError::InvalidInput`]; nothing here
//! touches stored state.

use serde_json::Value;
use crate::models::event::{CreateEventRequest, EventPatch, JoinEventRequest, NewEvent, UpdateEventRequest};
use crate::models::patch::Patch;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::is_blank;
use super::date::parse_event_date;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "activity, date, location, and instagramUsername are required";
pub const INVALID_DATE_MESSAGE: &str = "date must be a valid ISO 8601 date string";
pub const INVALID_CAPACITY_MESSAGE: &str = "capacity must be a positive integer";
pub const HANDLE_REQUIRED_MESSAGE: &str = "instagramUsername is required";

/// Outcome of inspecting one text field
#[derive(Debug, PartialEq, Eq)]
enum TextField {
    Missing,
    WrongType,
    Present(String),
}

fn classify_text(value: Option<&Value>) -> TextField {
    match value {
        None | Some(Value::Null) => TextField::Missing,
        Some(Value::String(s)) if is_blank(s) => TextField::Missing,
        Some(Value::String(s)) => TextField::Present(s.trim().to_string()),
        Some(_) => TextField::WrongType,
    }
}

fn expect_text(field: &str, value: TextField) -> Result<String> {
    match value {
        TextField::Present(s) => Ok(s),
        TextField::WrongType => Err(EventHubError::invalid(format!("{} must be a string", field))),
        TextField::Missing => Err(EventHubError::invalid(REQUIRED_FIELDS_MESSAGE)),
    }
}

fn parse_date_value(value: &Value) -> Result<chrono::DateTime<chrono::Utc>> {
    value
        .as_str()
        .and_then(parse_event_date)
        .ok_or_else(|| EventHubError::invalid(INVALID_DATE_MESSAGE))
}

/// Capacity must be a whole number of at least one
pub fn parse_capacity(value: &Value) -> Result<i32> {
    value
        .as_i64()
        .or_else(|| value.as_f64().and_then(integral))
        .filter(|c| *c >= 1)
        .and_then(|c| i32::try_from(c).ok())
        .ok_or_else(|| EventHubError::invalid(INVALID_CAPACITY_MESSAGE))
}

/// Parse the `:id` path segment
///
/// Integral decimal forms such as `1.0` or `1e2` name the same id.
pub fn parse_event_id(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral))
        .ok_or(EventHubError::InvalidEventId)
}

/// Whole-number floats that fit an `i64`
fn integral(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= LIMIT {
        Some(value as i64)
    } else {
        None
    }
}

/// Check a create payload
///
/// The returned event has no attendees; whether the host joins is decided
/// by the caller.
pub fn validate_create(request: &CreateEventRequest) -> Result<NewEvent> {
    let activity = classify_text(request.activity.as_ref());
    let location = classify_text(request.location.as_ref());
    let handle = classify_text(request.instagram_username.as_ref());
    let date_missing = match request.date.as_ref() {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => is_blank(s),
        Some(_) => false,
    };

    if date_missing
        || [&activity, &location, &handle]
            .iter()
            .any(|f| matches!(f, TextField::Missing))
    {
        return Err(EventHubError::invalid(REQUIRED_FIELDS_MESSAGE));
    }

    let activity = expect_text("activity", activity)?;
    let location = expect_text("location", location)?;
    let host_instagram = expect_text("instagramUsername", handle)?;

    // `date_missing` is false, so the value is present
    let date = match request.date.as_ref() {
        Some(value) => parse_date_value(value)?,
        None => return Err(EventHubError::invalid(REQUIRED_FIELDS_MESSAGE)),
    };

    let capacity = match request.capacity.as_ref() {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_capacity(value)?),
    };

    Ok(NewEvent {
        activity,
        date,
        location,
        host_instagram,
        capacity,
        attendees: Vec::new(),
    })
}

fn patch_text(field: &str, value: &Patch<Value>) -> Result<Option<String>> {
    match value {
        Patch::Absent => Ok(None),
        Patch::Null => Err(EventHubError::invalid(format!("{} cannot be empty", field))),
        Patch::Value(v) => match classify_text(Some(v)) {
            TextField::Present(s) => Ok(Some(s)),
            TextField::WrongType => Err(EventHubError::invalid(format!("{} must be a string", field))),
            TextField::Missing => Err(EventHubError::invalid(format!("{} cannot be empty", field))),
        },
    }
}

/// Check a partial update payload
///
/// The capacity-vs-attendance check needs the stored event and happens when
/// the patch is applied.
pub fn validate_update(request: &UpdateEventRequest) -> Result<EventPatch> {
    if request.activity.is_absent()
        && request.date.is_absent()
        && request.location.is_absent()
        && request.instagram_username.is_absent()
        && request.capacity.is_absent()
    {
        return Err(EventHubError::NoFieldsToUpdate);
    }

    let activity = patch_text("activity", &request.activity)?;
    let location = patch_text("location", &request.location)?;
    let host_instagram = patch_text("instagramUsername", &request.instagram_username)?;

    let date = match &request.date {
        Patch::Absent => None,
        Patch::Null => return Err(EventHubError::invalid("date cannot be empty")),
        Patch::Value(Value::String(s)) if is_blank(s) => {
            return Err(EventHubError::invalid("date cannot be empty"))
        }
        Patch::Value(value) => Some(parse_date_value(value)?),
    };

    let capacity = match &request.capacity {
        Patch::Absent => Patch::Absent,
        Patch::Null => Patch::Null,
        Patch::Value(value) => Patch::Value(parse_capacity(value)?),
    };

    Ok(EventPatch {
        activity,
        date,
        location,
        host_instagram,
        capacity,
    })
}

/// Check a join payload, returning the handle
pub fn validate_join(request: &JoinEventRequest) -> Result<String> {
    match classify_text(request.instagram_username.as_ref()) {
        TextField::Present(handle) => Ok(handle),
        TextField::Missing => Err(EventHubError::invalid(HANDLE_REQUIRED_MESSAGE)),
        TextField::WrongType => Err(EventHubError::invalid("instagramUsername must be a string")),
    }
}

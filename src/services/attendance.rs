//! Capacity and attendance rules
//!
//! These functions mutate an [`Event`] in place and are meant to run inside
//! the store's critical section, between reading the current row and
//! writing it back.

use crate::models::event::{Event, EventPatch};
use crate::models::patch::Patch;
use crate::utils::errors::{EventHubError, Result};

/// Add `handle` to the attendee list
///
/// A duplicate is reported before a full event, so joining a full event
/// twice still says "already joined".
pub fn join(event: &mut Event, handle: &str) -> Result<()> {
    if event.has_attendee(handle) {
        return Err(EventHubError::AlreadyJoined {
            event_id: event.id,
            handle: handle.to_string(),
        });
    }

    if let Some(capacity) = event.capacity {
        if event.is_full() {
            return Err(EventHubError::EventFull {
                event_id: event.id,
                capacity,
            });
        }
    }

    event.attendees.push(handle.to_string());
    Ok(())
}

/// A new capacity may not drop below the current attendance
pub fn check_capacity_change(event: &Event, capacity: i32) -> Result<()> {
    let attendees = event.current_attendees();
    if (capacity as usize) < attendees {
        return Err(EventHubError::CapacityBelowAttendance { capacity, attendees });
    }
    Ok(())
}

/// Apply a validated patch; on error the event is left untouched
pub fn apply_patch(event: &mut Event, patch: EventPatch) -> Result<()> {
    if let Patch::Value(capacity) = patch.capacity {
        check_capacity_change(event, capacity)?;
    }

    if let Some(activity) = patch.activity {
        event.activity = activity;
    }
    if let Some(date) = patch.date {
        event.date = date;
    }
    if let Some(location) = patch.location {
        event.location = location;
    }
    if let Some(host_instagram) = patch.host_instagram {
        event.host_instagram = host_instagram;
    }
    match patch.capacity {
        Patch::Absent => {}
        Patch::Null => event.capacity = None,
        Patch::Value(capacity) => event.capacity = Some(capacity),
    }

    Ok(())
}

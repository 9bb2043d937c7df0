//! Event list filtering and ordering

use crate::models::event::{Event, EventQuery};
use crate::utils::helpers::utc_date_key;

fn criterion(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Does the event satisfy every criterion of the query
pub fn matches(event: &Event, query: &EventQuery) -> bool {
    if let Some(activity) = criterion(&query.activity) {
        if !contains_ignore_case(&event.activity, activity) {
            return false;
        }
    }

    if let Some(location) = criterion(&query.location) {
        if !contains_ignore_case(&event.location, location) {
            return false;
        }
    }

    if let Some(date) = criterion(&query.date) {
        if utc_date_key(event.date) != date {
            return false;
        }
    }

    true
}

/// Keep matching events, ordered by date; equal dates keep their input order
pub fn filter_events(events: Vec<Event>, query: &EventQuery) -> Vec<Event> {
    let mut filtered: Vec<Event> = events
        .into_iter()
        .filter(|event| matches(event, query))
        .collect();
    filtered.sort_by_key(|event| event.date);
    filtered
}

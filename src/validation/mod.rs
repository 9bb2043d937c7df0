//! Input validation
//!
//! Date parsing and per-operation payload checks. Everything in here runs
//! before any stored event is read or written.

pub mod date;
pub mod rules;

pub use date::parse_event_date;
pub use rules::{validate_create, validate_update, validate_join, parse_event_id, parse_capacity};

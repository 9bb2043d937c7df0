//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod patch;

// Re-export commonly used models
pub use event::{Event, EventResponse, NewEvent, EventPatch, CreateEventRequest, UpdateEventRequest, JoinEventRequest, EventQuery};
pub use patch::Patch;

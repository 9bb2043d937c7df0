//! Services module
//!
//! This module contains the event business logic: attendance rules, list
//! filtering, and the service that ties them to a store.

pub mod attendance;
pub mod event;
pub mod filter;

// Re-export commonly used services
pub use event::EventService;
pub use filter::filter_events;

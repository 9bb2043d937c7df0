//! Database repositories module
//!
//! This module contains repository implementations for data access

pub mod event;

// Re-export repositories
pub use event::EventRepository;

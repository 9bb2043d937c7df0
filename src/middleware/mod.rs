//! Middleware module
//!
//! This module contains middleware for request processing

pub mod logging;
pub mod panic;

// Re-export commonly used middleware
pub use logging::log_requests;
pub use panic::handle_panic;

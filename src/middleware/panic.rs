//! Panic recovery
//!
//! Used with tower-http's `CatchPanicLayer` so a panicking handler still
//! answers with the generic 500 error body.

use std::any::Any;
use axum::response::{IntoResponse, Response};
use crate::utils::errors::EventHubError;

/// Turn a caught panic payload into the internal error response
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    EventHubError::Panic(detail).into_response()
}

//! Error handling for EventHub
//!
//! This module defines the main error type used throughout the application
//! and maps every failure onto one of the client-visible error categories.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for EventHub application
#[derive(Error, Debug)]
pub enum EventHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid event id")]
    InvalidEventId,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("Event not found")]
    EventNotFound { event_id: i64 },

    #[error("already joined")]
    AlreadyJoined { event_id: i64, handle: String },

    #[error("event is full")]
    EventFull { event_id: i64, capacity: i32 },

    #[error("capacity cannot be less than current attendee count ({attendees})")]
    CapacityBelowAttendance { capacity: i32, attendees: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Handler panicked: {0}")]
    Panic(String),
}

/// Result type alias for EventHub operations
pub type Result<T> = std::result::Result<T, EventHubError>;

/// Client-visible error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, empty or wrongly typed input
    InvalidInput,
    /// Unknown event id
    NotFound,
    /// Request conflicts with the current state of the event
    Conflict,
    /// Anything the client cannot fix
    Internal,
}

impl EventHubError {
    /// Shorthand for an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        EventHubError::InvalidInput(message.into())
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventHubError::InvalidInput(_)
            | EventHubError::InvalidEventId
            | EventHubError::NoFieldsToUpdate => ErrorKind::InvalidInput,
            EventHubError::EventNotFound { .. } => ErrorKind::NotFound,
            EventHubError::AlreadyJoined { .. }
            | EventHubError::EventFull { .. }
            | EventHubError::CapacityBelowAttendance { .. } => ErrorKind::Conflict,
            EventHubError::Database(_)
            | EventHubError::Migration(_)
            | EventHubError::Config(_)
            | EventHubError::Io(_)
            | EventHubError::Storage(_)
            | EventHubError::Panic(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status for the error
    ///
    /// A capacity conflict raised by an update is reported as a bad request,
    /// while join conflicts use 409.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventHubError::CapacityBelowAttendance { .. } => StatusCode::BAD_REQUEST,
            _ => match self.kind() {
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message safe to send to a client
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventHubError::Database(_) => ErrorSeverity::Critical,
            EventHubError::Migration(_) => ErrorSeverity::Critical,
            EventHubError::Config(_) => ErrorSeverity::Critical,
            EventHubError::Panic(_) => ErrorSeverity::Critical,
            EventHubError::Io(_) | EventHubError::Storage(_) => ErrorSeverity::Error,
            EventHubError::AlreadyJoined { .. }
            | EventHubError::EventFull { .. }
            | EventHubError::CapacityBelowAttendance { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Info,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for EventHubError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                severity = %self.severity(),
                error = %self,
                "Internal server error"
            );
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

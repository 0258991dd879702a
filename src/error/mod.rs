//! Error types for aqua.

use thiserror::Error;

/// Primary error type for all aqua operations.
#[derive(Error, Debug)]
pub enum AquaError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid continuation token: {0}")]
    InvalidCursor(String),

    #[error("Malformed event at index {index}{}: {reason}", event_label(.event_id))]
    MalformedEvent {
        index: usize,
        event_id: Option<String>,
        reason: String,
    },

    #[error("API error (status {status}{}): {message}", type_label(.error_type))]
    Api {
        status: u16,
        error_type: Option<String>,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn event_label(event_id: &Option<String>) -> String {
    event_id
        .as_deref()
        .map(|id| format!(" ({id})"))
        .unwrap_or_default()
}

fn type_label(error_type: &Option<String>) -> String {
    error_type
        .as_deref()
        .map(|t| format!(", {t}"))
        .unwrap_or_default()
}

impl AquaError {
    /// Create an API error without a service error type.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            error_type: None,
            message: message.into(),
        }
    }

    /// Create a malformed-event error for the event at `index`.
    pub fn malformed_event(
        index: usize,
        event_id: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedEvent {
            index,
            event_id,
            reason: reason.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AquaError>;

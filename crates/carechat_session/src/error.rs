//! Error types for session access.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while reading or writing chat sessions.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Chat session not found: {0}")]
    NotFound(String),

    #[error("Message {message_id} not found in session {session_id}")]
    MessageNotFound {
        session_id: String,
        message_id: String,
    },

    #[error("Invalid session id: {0}")]
    InvalidId(String),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid session data in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// Whether the store itself could not be reached, as opposed to the
    /// session or its data being missing or malformed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Io(_))
    }
}

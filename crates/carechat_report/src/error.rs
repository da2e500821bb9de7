//! Error types for report generation.

use std::path::PathBuf;

use carechat_session::SessionError;
use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while generating or saving a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Section {section} could not read its data: {message}")]
    ComponentData { section: String, message: String },

    #[error("Collaborator failure: {0}")]
    Collaborator(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Cannot write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReportError {
    /// Whether an external collaborator (session store or summarizer) was
    /// unreachable, as opposed to bad data or a local failure.
    pub fn is_collaborator_failure(&self) -> bool {
        match self {
            Self::Collaborator(_) | Self::Timeout(_) => true,
            Self::Session(e) => e.is_unavailable(),
            _ => false,
        }
    }

    pub fn component_data(section: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ComponentData {
            section: section.into(),
            message: message.into(),
        }
    }
}

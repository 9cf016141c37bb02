//! Error types for task client operations

use thiserror::Error;

/// Result type for task client operations
pub type TaskClientResult<T> = Result<T, TaskClientError>;

/// Error type for task client operations
#[derive(Error, Debug)]
pub enum TaskClientError {
    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No item with this client id in the collection
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// The item exists locally but has no server id yet
    #[error("Task {0} has not been saved")]
    NotSaved(String),

    /// The page did not carry a usable bootstrap snapshot
    #[error("Bootstrap error: {0}")]
    Bootstrap(String),
}

impl TaskClientError {
    /// The HTTP status for server-reported errors
    pub fn status(&self) -> Option<u16> {
        match self {
            TaskClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the task as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<url::ParseError> for TaskClientError {
    fn from(err: url::ParseError) -> Self {
        TaskClientError::InvalidUrl(err.to_string())
    }
}

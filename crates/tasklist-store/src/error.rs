//! Unified error types for task store operations.

/// Unified error type for task store operations.
///
/// Only two failure kinds exist: an id that resolves to no record, and a
/// request body that is not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskStoreError {
    #[error("Task not found: {0}")]
    NotFound(i64),

    #[error("Malformed task body: {0}")]
    MalformedBody(String),
}

impl From<serde_json::Error> for TaskStoreError {
    fn from(err: serde_json::Error) -> Self {
        TaskStoreError::MalformedBody(err.to_string())
    }
}

impl TaskStoreError {
    /// Message exposed to HTTP clients in the `{"error": ...}` body.
    pub fn public_message(&self) -> &'static str {
        match self {
            TaskStoreError::NotFound(_) => "Task not found",
            TaskStoreError::MalformedBody(_) => "Could not parse task JSON",
        }
    }
}

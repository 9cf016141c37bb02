//! Core task store trait.
//!
//! Handlers receive an `Arc<dyn TaskStore>` so tests can build isolated
//! stores instead of sharing one process-wide sequence.

use crate::error::TaskStoreError;
use crate::record::{TaskFields, TaskRecord};
use async_trait::async_trait;

/// How externally visible ids are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScheme {
    /// Ids come from a monotonically increasing counter and never shift.
    #[default]
    Stable,
    /// The id is the record's current position plus one; deleting a record
    /// shifts every later id down by one.
    Positional,
}

impl IdScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdScheme::Stable => "stable",
            IdScheme::Positional => "positional",
        }
    }
}

impl std::fmt::Display for IdScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stable" => Ok(IdScheme::Stable),
            "positional" => Ok(IdScheme::Positional),
            other => Err(format!(
                "unknown id scheme '{}', expected 'stable' or 'positional'",
                other
            )),
        }
    }
}

/// Core trait for task store backends.
///
/// Every operation is atomic with respect to the others; no ordering is
/// promised between concurrent callers.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Human-readable name of the backend (e.g. "in-memory")
    fn backend_name(&self) -> &'static str;

    /// The identity scheme this store assigns ids with.
    fn id_scheme(&self) -> IdScheme;

    /// All tasks in creation order.
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, TaskStoreError>;

    /// Append a task built from `fields` and return it.
    async fn create_task(&self, fields: TaskFields) -> Result<TaskRecord, TaskStoreError>;

    /// Get a task by id. Ids that resolve to nothing yield `NotFound`.
    async fn get_task(&self, id: i64) -> Result<TaskRecord, TaskStoreError>;

    /// Merge `fields` into an existing task and return the merged record.
    async fn update_task(&self, id: i64, fields: TaskFields)
    -> Result<TaskRecord, TaskStoreError>;

    /// Remove a task, returning the removed record.
    async fn delete_task(&self, id: i64) -> Result<TaskRecord, TaskStoreError>;

    /// Number of tasks currently stored.
    async fn task_count(&self) -> Result<usize, TaskStoreError>;
}

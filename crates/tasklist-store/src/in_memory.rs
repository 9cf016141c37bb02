//! In-memory task store backend.
//!
//! Tasks live in a `Vec` (creation order) behind an `RwLock`. Nothing
//! survives a process restart.

use crate::error::TaskStoreError;
use crate::record::{TaskFields, TaskRecord, unix_now};
use crate::traits::{IdScheme, TaskStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration for the in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskConfig {
    /// How ids are assigned (default: stable counter)
    pub id_scheme: IdScheme,
}

#[derive(Debug)]
struct TaskSequence {
    tasks: Vec<TaskRecord>,
    /// Next counter value for `IdScheme::Stable`
    next_id: u64,
}

impl TaskSequence {
    fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Resolve an external id to an index into `tasks`.
    fn position(&self, scheme: IdScheme, id: i64) -> Result<usize, TaskStoreError> {
        if id <= 0 {
            return Err(TaskStoreError::NotFound(id));
        }
        let found = match scheme {
            IdScheme::Positional => {
                let index = (id - 1) as usize;
                (index < self.tasks.len()).then_some(index)
            }
            // Stable ids are assigned in append order, so the Vec stays sorted by id
            IdScheme::Stable => self
                .tasks
                .binary_search_by_key(&(id as u64), |task| task.id)
                .ok(),
        };
        found.ok_or(TaskStoreError::NotFound(id))
    }

    fn allocate_id(&mut self, scheme: IdScheme) -> u64 {
        match scheme {
            IdScheme::Positional => self.tasks.len() as u64 + 1,
            IdScheme::Stable => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        }
    }

    /// Re-derive positional ids from `from` onwards after a removal.
    fn renumber_from(&mut self, from: usize) {
        for (index, task) in self.tasks.iter_mut().enumerate().skip(from) {
            task.id = index as u64 + 1;
        }
    }
}

/// In-memory task store backend.
///
/// Cloning is cheap and clones share the same sequence.
#[derive(Clone)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<TaskSequence>>,
    config: InMemoryTaskConfig,
}

impl InMemoryTaskStore {
    /// Create a new in-memory task store with default configuration.
    pub fn new() -> Self {
        Self::with_config(InMemoryTaskConfig::default())
    }

    /// Create a new in-memory task store with custom configuration.
    pub fn with_config(config: InMemoryTaskConfig) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(TaskSequence::new())),
            config,
        }
    }

    /// Shorthand for a store using the given id scheme.
    pub fn with_id_scheme(id_scheme: IdScheme) -> Self {
        Self::with_config(InMemoryTaskConfig { id_scheme })
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn backend_name(&self) -> &'static str {
        "in-memory"
    }

    fn id_scheme(&self) -> IdScheme {
        self.config.id_scheme
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, TaskStoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.tasks.clone())
    }

    async fn create_task(&self, fields: TaskFields) -> Result<TaskRecord, TaskStoreError> {
        let mut tasks = self.tasks.write().await;

        let id = tasks.allocate_id(self.config.id_scheme);
        let task = TaskRecord::new(id, fields, unix_now());
        tasks.tasks.push(task.clone());

        debug!("Created task {} ({} total)", id, tasks.tasks.len());
        Ok(task)
    }

    async fn get_task(&self, id: i64) -> Result<TaskRecord, TaskStoreError> {
        let tasks = self.tasks.read().await;
        let index = tasks.position(self.config.id_scheme, id)?;
        Ok(tasks.tasks[index].clone())
    }

    async fn update_task(
        &self,
        id: i64,
        fields: TaskFields,
    ) -> Result<TaskRecord, TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let index = tasks.position(self.config.id_scheme, id)?;

        let task = &mut tasks.tasks[index];
        task.merge(fields, unix_now());

        debug!("Updated task {}", id);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> Result<TaskRecord, TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let index = tasks.position(self.config.id_scheme, id)?;

        info!("Deleting task {}", id);
        let removed = tasks.tasks.remove(index);
        if self.config.id_scheme == IdScheme::Positional {
            tasks.renumber_from(index);
        }
        Ok(removed)
    }

    async fn task_count(&self) -> Result<usize, TaskStoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.tasks.len())
    }
}

//! Transport layer for the task client

use async_trait::async_trait;
use tasklist_store::{TaskFields, TaskRecord};

use crate::error::TaskClientResult;

pub mod http;

pub use http::HttpTaskApi;

/// Remote task API as seen by the collection.
///
/// Implemented over HTTP by `HttpTaskApi`; tests substitute in-process fakes.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /tasks`
    async fn list(&self) -> TaskClientResult<Vec<TaskRecord>>;

    /// `POST /tasks`
    async fn create(&self, fields: TaskFields) -> TaskClientResult<TaskRecord>;

    /// `GET /tasks/:id`
    async fn get(&self, id: u64) -> TaskClientResult<TaskRecord>;

    /// `PUT /tasks/:id`
    async fn update(&self, id: u64, fields: TaskFields) -> TaskClientResult<TaskRecord>;

    /// `DELETE /tasks/:id`
    async fn delete(&self, id: u64) -> TaskClientResult<()>;
}

//! In-process `TaskApi` fake shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::Notify;

use tasklist_store::{TaskFields, TaskRecord, unix_now};

use crate::error::{TaskClientError, TaskClientResult};
use crate::transport::TaskApi;

pub(crate) fn fields(value: Value) -> TaskFields {
    match value {
        Value::Object(map) => map,
        _ => panic!("test fixture must be an object"),
    }
}

pub(crate) fn record(id: u64, comment: &str) -> TaskRecord {
    TaskRecord::new(id, fields(json!({"comment": comment})), 1_700_000_000)
}

#[derive(Default)]
struct MockState {
    records: Vec<TaskRecord>,
    next_id: u64,
    deleted: Vec<u64>,
}

/// Stable-id task API backed by a vector.
#[derive(Default)]
pub(crate) struct MockTaskApi {
    state: Mutex<MockState>,
    requests: AtomicUsize,
    fail_next: AtomicBool,
    hold_creates: AtomicBool,
    create_started: Notify,
    create_released: Notify,
}

impl MockTaskApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_records(records: Vec<TaskRecord>) -> Self {
        let api = Self::new();
        api.set_records(records);
        api
    }

    pub(crate) fn set_records(&self, records: Vec<TaskRecord>) {
        let mut state = self.state.lock();
        state.next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        state.records = records;
    }

    pub(crate) fn records(&self) -> Vec<TaskRecord> {
        self.state.lock().records.clone()
    }

    pub(crate) fn deleted(&self) -> Vec<u64> {
        self.state.lock().deleted.clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Make the next request fail with a 500.
    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Park create requests until `release_create`.
    pub(crate) fn hold_creates(&self) {
        self.hold_creates.store(true, Ordering::SeqCst);
    }

    pub(crate) async fn create_started(&self) {
        self.create_started.notified().await;
    }

    pub(crate) fn release_create(&self) {
        self.create_released.notify_one();
    }

    fn begin(&self) -> TaskClientResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(TaskClientError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok(())
    }

    fn not_found() -> TaskClientError {
        TaskClientError::Api {
            status: 404,
            message: "Task not found".to_string(),
        }
    }
}

#[async_trait]
impl TaskApi for MockTaskApi {
    async fn list(&self) -> TaskClientResult<Vec<TaskRecord>> {
        self.begin()?;
        Ok(self.records())
    }

    async fn create(&self, fields: TaskFields) -> TaskClientResult<TaskRecord> {
        self.begin()?;
        if self.hold_creates.load(Ordering::SeqCst) {
            self.create_started.notify_one();
            self.create_released.notified().await;
        }
        let mut state = self.state.lock();
        state.next_id += 1;
        let record = TaskRecord::new(state.next_id, fields, unix_now());
        state.records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: u64) -> TaskClientResult<TaskRecord> {
        self.begin()?;
        self.state
            .lock()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn update(&self, id: u64, fields: TaskFields) -> TaskClientResult<TaskRecord> {
        self.begin()?;
        let mut state = self.state.lock();
        let record = state
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(Self::not_found)?;
        record.merge(fields, unix_now());
        Ok(record.clone())
    }

    async fn delete(&self, id: u64) -> TaskClientResult<()> {
        self.begin()?;
        let mut state = self.state.lock();
        let index = state
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(Self::not_found)?;
        state.records.remove(index);
        state.deleted.push(id);
        Ok(())
    }
}

//! Shared test functions that must hold for every id scheme.
//!
//! Each test takes a `&dyn TaskStore`; backend test modules call them once per
//! configured scheme.

use crate::error::TaskStoreError;
use crate::record::{TaskFields, unix_now};
use crate::traits::TaskStore;
use serde_json::{Value, json};
use std::sync::Arc;

pub fn fields(value: Value) -> TaskFields {
    match value {
        Value::Object(map) => map,
        _ => panic!("test fixture must be an object"),
    }
}

/// Creating N tasks yields ids 1..=N in creation order.
pub async fn test_sequential_ids(store: &dyn TaskStore) {
    for n in 1..=5 {
        let task = store
            .create_task(fields(json!({ "comment": format!("task {}", n) })))
            .await
            .unwrap();
        assert_eq!(task.id, n, "scheme {}", store.id_scheme());
    }

    let listed = store.list_tasks().await.unwrap();
    let ids: Vec<u64> = listed.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(listed[0].comment(), Some("task 1"));
    assert_eq!(listed[4].comment(), Some("task 5"));
    assert_eq!(store.task_count().await.unwrap(), 5);
}

/// Update keeps `created_at`, refreshes `updated_at` and ignores reserved keys.
pub async fn test_update_semantics(store: &dyn TaskStore) {
    let created = store
        .create_task(fields(json!({"comment": "buy milk", "list": "groceries"})))
        .await
        .unwrap();

    let before = unix_now();
    let updated = store
        .update_task(
            created.id as i64,
            fields(json!({
                "comment": "buy oat milk",
                "id": 999,
                "created_at": 0,
                "updated_at": 0
            })),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.unwrap() >= before);
    assert_eq!(updated.comment(), Some("buy oat milk"));
    assert_eq!(updated.field("list"), Some(&json!("groceries")));

    let fetched = store.get_task(created.id as i64).await.unwrap();
    assert_eq!(fetched, updated);
}

/// Zero, negative and out-of-range ids all resolve to `NotFound`.
pub async fn test_not_found_ids(store: &dyn TaskStore) {
    store
        .create_task(fields(json!({"comment": "only"})))
        .await
        .unwrap();

    for id in [0, -1, -100, 2, 1_000] {
        assert_eq!(
            store.get_task(id).await,
            Err(TaskStoreError::NotFound(id)),
            "get {}",
            id
        );
        assert_eq!(
            store.update_task(id, TaskFields::new()).await,
            Err(TaskStoreError::NotFound(id)),
            "update {}",
            id
        );
        assert_eq!(
            store.delete_task(id).await,
            Err(TaskStoreError::NotFound(id)),
            "delete {}",
            id
        );
    }
    assert_eq!(store.task_count().await.unwrap(), 1);
}

/// A deleted id is gone from reads and listing when it was the last task.
pub async fn test_delete_then_read(store: &dyn TaskStore) {
    let task = store
        .create_task(fields(json!({"comment": "short lived"})))
        .await
        .unwrap();

    let removed = store.delete_task(task.id as i64).await.unwrap();
    assert_eq!(removed.comment(), Some("short lived"));
    assert_eq!(
        store.get_task(task.id as i64).await,
        Err(TaskStoreError::NotFound(task.id as i64))
    );
    assert!(store.list_tasks().await.unwrap().is_empty());
}

/// Concurrent creates never hand out the same id twice.
pub async fn test_concurrent_creates(store: Arc<dyn TaskStore>) {
    let mut handles = Vec::new();
    for n in 0..20 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create_task(fields(json!({ "n": n })))
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
}

//! Observable client-side mirror of the server's task list.
//!
//! Items are keyed by a locally generated client id (`c1`, `c2`, ...) that
//! exists before the server has assigned an id. State sits behind a
//! `parking_lot::Mutex` that is never held across an `.await` or while
//! observers run.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use tasklist_store::{COMMENT_KEY, TaskFields, TaskRecord, strip_reserved};

use crate::error::{TaskClientError, TaskClientResult};
use crate::transport::TaskApi;

/// Locally generated item identifier, rendered as `c{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = TaskClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('c')
            .and_then(|n| n.parse().ok())
            .map(ClientId)
            .ok_or_else(|| TaskClientError::UnknownItem(s.to_string()))
    }
}

/// One task as known to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskItem {
    pub cid: ClientId,
    /// Server id, `None` until the create round trip completes
    pub id: Option<u64>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub fields: TaskFields,
}

impl TaskItem {
    fn new(cid: ClientId, mut fields: TaskFields) -> Self {
        strip_reserved(&mut fields);
        Self {
            cid,
            id: None,
            created_at: None,
            updated_at: None,
            fields,
        }
    }

    fn from_record(cid: ClientId, record: TaskRecord) -> Self {
        Self {
            cid,
            id: Some(record.id),
            created_at: Some(record.created_at),
            updated_at: record.updated_at,
            fields: record.fields,
        }
    }

    /// Whether the server has not stored this item yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// The `comment` field, when it is a string.
    pub fn comment(&self) -> Option<&str> {
        self.fields.get(COMMENT_KEY).and_then(Value::as_str)
    }

    /// The `comment` field as display text; non-string values show as JSON.
    pub fn comment_text(&self) -> String {
        match self.fields.get(COMMENT_KEY) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Take over the server's view of this item.
    fn apply_record(&mut self, record: TaskRecord) {
        self.id = Some(record.id);
        self.created_at = Some(record.created_at);
        self.updated_at = record.updated_at;
        self.fields = record.fields;
    }
}

/// Receives collection change notifications.
///
/// Callbacks run synchronously on the thread that changed the collection,
/// after its lock has been released.
pub trait CollectionObserver: Send + Sync {
    fn on_added(&self, _item: &TaskItem) {}

    fn on_removed(&self, _item: &TaskItem) {}

    /// Server state was merged into an existing item
    fn on_changed(&self, _item: &TaskItem) {}
}

#[derive(Default)]
struct CollectionState {
    items: Vec<TaskItem>,
    last_cid: u64,
}

impl CollectionState {
    fn next_cid(&mut self) -> ClientId {
        self.last_cid += 1;
        ClientId(self.last_cid)
    }

    fn find_mut(&mut self, cid: ClientId) -> Option<&mut TaskItem> {
        self.items.iter_mut().find(|item| item.cid == cid)
    }

    fn remove(&mut self, cid: ClientId) -> Option<TaskItem> {
        let index = self.items.iter().position(|item| item.cid == cid)?;
        Some(self.items.remove(index))
    }
}

enum Change<'a> {
    Added(&'a TaskItem),
    Removed(&'a TaskItem),
    Changed(&'a TaskItem),
}

/// Ordered task collection synchronised with the server through a `TaskApi`.
pub struct TaskCollection {
    api: Arc<dyn TaskApi>,
    state: Mutex<CollectionState>,
    observers: Mutex<Vec<Weak<dyn CollectionObserver>>>,
}

impl TaskCollection {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            state: Mutex::new(CollectionState::default()),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// The API this collection talks to
    pub fn api(&self) -> &Arc<dyn TaskApi> {
        &self.api
    }

    /// Register an observer. It is held weakly and pruned once dropped.
    pub fn subscribe<O: CollectionObserver + 'static>(&self, observer: &Arc<O>) {
        let observer: Arc<dyn CollectionObserver> = observer.clone();
        self.observers.lock().push(Arc::downgrade(&observer));
    }

    fn notify(&self, change: Change<'_>) {
        let observers: Vec<Arc<dyn CollectionObserver>> = {
            let mut observers = self.observers.lock();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        for observer in observers {
            match change {
                Change::Added(item) => observer.on_added(item),
                Change::Removed(item) => observer.on_removed(item),
                Change::Changed(item) => observer.on_changed(item),
            }
        }
    }

    /// Populate from a bootstrap snapshot. No requests, no notifications.
    pub fn seed(&self, records: Vec<TaskRecord>) {
        let mut state = self.state.lock();
        for record in records {
            let cid = state.next_cid();
            state.items.push(TaskItem::from_record(cid, record));
        }
        debug!("Seeded collection with {} tasks", state.items.len());
    }

    /// Append an unsaved item and emit "added".
    pub fn add_new(&self, fields: TaskFields) -> TaskItem {
        let item = {
            let mut state = self.state.lock();
            let cid = state.next_cid();
            let item = TaskItem::new(cid, fields);
            state.items.push(item.clone());
            item
        };
        self.notify(Change::Added(&item));
        item
    }

    /// Create the unsaved item `cid` on the server and merge the result.
    ///
    /// On failure the item is removed again ("removed" is emitted) and the
    /// error is returned. If the item was destroyed locally while the request
    /// was in flight, the server record is not tracked until the next `fetch`.
    pub async fn save_new(&self, cid: ClientId) -> TaskClientResult<TaskItem> {
        let fields = self
            .get(cid)
            .ok_or_else(|| TaskClientError::UnknownItem(cid.to_string()))?
            .fields;

        let record = match self.api.create(fields).await {
            Ok(record) => record,
            Err(err) => {
                warn!("Create of {} failed, rolling back: {}", cid, err);
                let removed = self.state.lock().remove(cid);
                if let Some(item) = removed {
                    self.notify(Change::Removed(&item));
                }
                return Err(err);
            }
        };

        let saved = {
            let mut state = self.state.lock();
            state.find_mut(cid).map(|item| {
                item.apply_record(record.clone());
                item.clone()
            })
        };

        match saved {
            Some(item) => {
                debug!("Saved {} as task {}", cid, record.id);
                self.notify(Change::Changed(&item));
                Ok(item)
            }
            None => {
                warn!(
                    "{} was removed before its create completed; task {} is not tracked",
                    cid, record.id
                );
                Ok(TaskItem::from_record(cid, record))
            }
        }
    }

    /// Append a new item (emitting "added") and create it on the server.
    pub async fn create(&self, fields: TaskFields) -> TaskClientResult<TaskItem> {
        let item = self.add_new(fields);
        self.save_new(item.cid).await
    }

    /// Delete `cid` on the server (if it was saved) and drop it locally.
    ///
    /// The local item survives a failed request.
    pub async fn destroy(&self, cid: ClientId) -> TaskClientResult<()> {
        let item = self
            .get(cid)
            .ok_or_else(|| TaskClientError::UnknownItem(cid.to_string()))?;

        if let Some(id) = item.id {
            self.api.delete(id).await?;
            info!("Deleted task {} ({})", id, cid);
        } else {
            debug!("Removing unsaved item {}", cid);
        }

        let removed = self.state.lock().remove(cid);
        if let Some(item) = removed {
            self.notify(Change::Removed(&item));
        }
        Ok(())
    }

    /// Send `fields` as an update for `cid` and merge the server's answer.
    pub async fn update(&self, cid: ClientId, fields: TaskFields) -> TaskClientResult<TaskItem> {
        let id = self
            .get(cid)
            .ok_or_else(|| TaskClientError::UnknownItem(cid.to_string()))?
            .id
            .ok_or_else(|| TaskClientError::NotSaved(cid.to_string()))?;

        let record = self.api.update(id, fields).await?;
        let updated = {
            let mut state = self.state.lock();
            state.find_mut(cid).map(|item| {
                item.apply_record(record.clone());
                item.clone()
            })
        };

        match updated {
            Some(item) => {
                self.notify(Change::Changed(&item));
                Ok(item)
            }
            None => Ok(TaskItem::from_record(cid, record)),
        }
    }

    /// Replace the contents with the server's list.
    ///
    /// Items whose server id is still listed keep their client id; every
    /// dropped item emits "removed" and every new one "added".
    pub async fn fetch(&self) -> TaskClientResult<()> {
        let records = self.api.list().await?;

        let (removed, added, changed) = {
            let mut state = self.state.lock();
            let mut previous = std::mem::take(&mut state.items);
            let mut added = Vec::new();
            let mut changed = Vec::new();

            for record in records {
                let known = previous
                    .iter()
                    .position(|item| item.id == Some(record.id));
                match known {
                    Some(index) => {
                        let mut item = previous.remove(index);
                        item.apply_record(record);
                        changed.push(item.clone());
                        state.items.push(item);
                    }
                    None => {
                        let cid = state.next_cid();
                        let item = TaskItem::from_record(cid, record);
                        added.push(item.clone());
                        state.items.push(item);
                    }
                }
            }
            (previous, added, changed)
        };

        debug!(
            "Fetched tasks: {} added, {} removed, {} kept",
            added.len(),
            removed.len(),
            changed.len()
        );
        for item in &removed {
            self.notify(Change::Removed(item));
        }
        for item in &added {
            self.notify(Change::Added(item));
        }
        for item in &changed {
            self.notify(Change::Changed(item));
        }
        Ok(())
    }

    pub fn get(&self, cid: ClientId) -> Option<TaskItem> {
        self.state
            .lock()
            .items
            .iter()
            .find(|item| item.cid == cid)
            .cloned()
    }

    pub fn get_by_id(&self, id: u64) -> Option<TaskItem> {
        self.state
            .lock()
            .items
            .iter()
            .find(|item| item.id == Some(id))
            .cloned()
    }

    /// Snapshot of all items in order
    pub fn items(&self) -> Vec<TaskItem> {
        self.state.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! The task record and its client-supplied field map.
//!
//! A record serializes as one flat JSON object: the server-assigned keys
//! (`id`, `created_at`, `updated_at`) next to whatever fields the client sent.

use crate::error::TaskStoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form fields supplied by clients (e.g. `comment`).
pub type TaskFields = Map<String, Value>;

/// Keys owned by the server. Client values for these are dropped before merge.
pub const RESERVED_KEYS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Field most clients use for the task text.
pub const COMMENT_KEY: &str = "comment";

/// A stored task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Externally visible 1-based identifier
    pub id: u64,
    /// Unix timestamp (seconds) of creation, never changes
    pub created_at: i64,
    /// Unix timestamp (seconds) of the last update, `null` until updated
    pub updated_at: Option<i64>,
    /// Client-supplied fields, merged shallowly on update
    #[serde(flatten)]
    pub fields: TaskFields,
}

impl TaskRecord {
    /// Build a fresh record. Reserved keys in `fields` are discarded.
    pub fn new(id: u64, mut fields: TaskFields, created_at: i64) -> Self {
        strip_reserved(&mut fields);
        Self {
            id,
            created_at,
            updated_at: None,
            fields,
        }
    }

    /// Shallow-merge `fields` into this record and stamp `updated_at`.
    ///
    /// Incoming values overwrite existing keys of the same name; keys absent
    /// from `fields` are preserved. Reserved keys are never taken from `fields`.
    pub fn merge(&mut self, mut fields: TaskFields, updated_at: i64) {
        strip_reserved(&mut fields);
        self.fields.extend(fields);
        self.updated_at = Some(updated_at);
    }

    /// The `comment` field, when it is a string.
    pub fn comment(&self) -> Option<&str> {
        self.fields.get(COMMENT_KEY).and_then(Value::as_str)
    }

    /// Look up a client-supplied field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Remove every reserved key from `fields`, returning the keys that were present.
pub fn strip_reserved(fields: &mut TaskFields) -> Vec<&'static str> {
    RESERVED_KEYS
        .iter()
        .copied()
        .filter(|key| fields.remove(*key).is_some())
        .collect()
}

/// Parse a request body into task fields.
///
/// The body must be a JSON object; invalid JSON, arrays and scalars are all
/// rejected as malformed.
pub fn parse_fields(body: &[u8]) -> Result<TaskFields, TaskStoreError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(fields) => Ok(fields),
        other => Err(TaskStoreError::MalformedBody(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Current time as a Unix timestamp in seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

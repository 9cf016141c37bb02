//! # Task Store
//!
//! **Task record model and pluggable task store for the tasklist service.**
//!
//! A task is a flat JSON object: server-assigned `id`, `created_at` and
//! `updated_at` plus any fields the client sends. This crate provides the
//! `TaskStore` trait and an in-memory implementation.
//!
//! ## Quick Start
//!
//! ```rust
//! use tasklist_store::prelude::*;
//!
//! # async fn example() -> Result<(), TaskStoreError> {
//! let store = InMemoryTaskStore::new();
//!
//! let created = store.create_task(parse_fields(br#"{"comment":"buy milk"}"#)?).await?;
//! assert_eq!(created.id, 1);
//! assert_eq!(created.updated_at, None);
//!
//! // Reserved keys in the body are ignored
//! let updated = store
//!     .update_task(1, parse_fields(br#"{"comment":"buy oat milk","id":999}"#)?)
//!     .await?;
//! assert_eq!(updated.id, 1);
//! assert!(updated.updated_at.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`TaskStore` trait**: list/create/read/update/delete over an ordered sequence
//! - **`TaskRecord`**: serializable record with a free-form field map
//! - **`IdScheme`**: stable counter ids (default) or position-derived ids

pub mod error;
#[cfg(feature = "in-memory")]
pub mod in_memory;
pub mod prelude;
pub mod record;
pub mod traits;

#[cfg(all(test, feature = "in-memory"))]
pub(crate) mod scheme_tests;

// Re-exports for convenience
pub use error::TaskStoreError;
#[cfg(feature = "in-memory")]
pub use in_memory::{InMemoryTaskConfig, InMemoryTaskStore};
pub use record::{
    COMMENT_KEY, RESERVED_KEYS, TaskFields, TaskRecord, parse_fields, strip_reserved, unix_now,
};
pub use traits::{IdScheme, TaskStore};

/// Create a default in-memory task store.
#[cfg(feature = "in-memory")]
pub fn create_default_store() -> InMemoryTaskStore {
    InMemoryTaskStore::new()
}

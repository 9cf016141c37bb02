//! Prelude module for convenient imports.
//!
//! ```rust,no_run
//! use tasklist_store::prelude::*;
//! ```

pub use crate::error::TaskStoreError;
#[cfg(feature = "in-memory")]
pub use crate::in_memory::{InMemoryTaskConfig, InMemoryTaskStore};
pub use crate::record::{TaskFields, TaskRecord, parse_fields};
pub use crate::traits::{IdScheme, TaskStore};

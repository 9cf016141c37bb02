//! # Task Client Prelude
//!
//! ```rust
//! use tasklist_client::prelude::*;
//! ```

pub use crate::app::TaskApp;
pub use crate::collection::{ClientId, CollectionObserver, TaskCollection, TaskItem};
pub use crate::config::ClientConfig;
pub use crate::dom::{DomEvent, Element};
pub use crate::error::{TaskClientError, TaskClientResult};
pub use crate::form_view::FormView;
pub use crate::list_view::ListView;
pub use crate::transport::{HttpTaskApi, TaskApi};

pub use tasklist_store::{TaskFields, TaskRecord};

pub use std::time::Duration;

//! # HTTP Task Server Prelude
//!
//! ```rust
//! use tasklist_http_server::prelude::*;
//! ```

pub use crate::cors::CorsLayer;
pub use crate::handler::TaskHttpHandler;
pub use crate::server::{ServerConfig, ServerStats, TaskHttpServer, TaskHttpServerBuilder};

pub use tasklist_store::prelude::*;

// Error types
pub use crate::{HttpTaskError, Result};

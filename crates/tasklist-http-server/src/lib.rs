//! # HTTP Task Server
//!
//! This crate provides the HTTP API of the tasklist service: list, create,
//! read, update and delete over an injected `TaskStore`, plus an index page
//! that embeds the current task list as a bootstrap snapshot.
//!
//! ## Endpoints
//! - `GET /`: HTML page with the bootstrap snapshot
//! - `GET /tasks`, `POST /tasks`
//! - `GET /tasks/:id`, `PUT /tasks/:id`, `DELETE /tasks/:id`
//!
//! ## Features
//! - JSON content type and `{"error": ...}` bodies on every API response
//! - CORS support for browser-based clients
//! - Isolated stores per server instance for testing

pub mod cors;
pub mod handler;
pub mod page;
pub mod prelude;
pub mod response;
pub mod routes;
pub mod server;

#[cfg(test)]
mod tests;

// Re-export main types
pub use cors::CorsLayer;
pub use handler::TaskHttpHandler;
pub use page::{BOOTSTRAP_ELEMENT_ID, bootstrap_json, render_index};
pub use response::ApiError;
pub use routes::{Route, parse_task_id};
pub use server::{ServerConfig, ServerStats, TaskHttpServer, TaskHttpServerBuilder};

// Re-export foundational types
pub use tasklist_store::{IdScheme, InMemoryTaskStore, TaskRecord, TaskStore};

/// Result type for HTTP task server operations
pub type Result<T> = std::result::Result<T, HttpTaskError>;

/// HTTP task server errors
#[derive(Debug, thiserror::Error)]
pub enum HttpTaskError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

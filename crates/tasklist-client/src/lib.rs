//! # Task Client
//!
//! Client side of the tasklist service: an HTTP API client, an observable
//! task collection that mirrors the server, and headless list and form views
//! that keep an element tree in step with the collection.
//!
//! ## Features
//!
//! - **`TaskApi` seam**: reqwest-based `HttpTaskApi`, replaceable in tests
//! - **`TaskCollection`**: client ids (`c1`, `c2`, ...), observers, create rollback
//! - **Views**: `ListView` (`ul#task-list`) and `FormView` (`form#task-form`)
//! - **Bootstrap**: seed from the snapshot embedded in the index page
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasklist_client::{HttpTaskApi, TaskApp};
//! use tasklist_client::dom::DomEvent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpTaskApi::new("http://127.0.0.1:4567")?;
//!     let app = TaskApp::load(api).await?;
//!     println!("{}", app.list.to_html());
//!
//!     app.form.set_input("buy milk");
//!     let created = app.form.on_submit(&mut DomEvent::submit()).await?;
//!     println!("created task {:?}", created.id);
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod bootstrap;
pub mod collection;
pub mod config;
pub mod dom;
pub mod error;
pub mod form_view;
pub mod list_view;
pub mod prelude;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use app::TaskApp;
pub use collection::{ClientId, CollectionObserver, TaskCollection, TaskItem};
pub use config::ClientConfig;
pub use error::{TaskClientError, TaskClientResult};
pub use form_view::FormView;
pub use list_view::ListView;
pub use transport::{HttpTaskApi, TaskApi};

// Re-export record types for convenience
pub use tasklist_store::{TaskFields, TaskRecord};

//! HTTP task server with pluggable store
//!
//! One tokio task per connection, HTTP/1.1 via hyper. The store is owned by
//! the server and injected into every request handler.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use tasklist_store::{InMemoryTaskStore, TaskStore};

use crate::{HttpTaskError, Result, TaskHttpHandler};

/// Configuration for the HTTP task server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_address: SocketAddr,
    /// Path of the task collection endpoint
    pub tasks_path: String,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum request body size
    pub max_body_size: usize,
    /// Title shown on the index page
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 4567)),
            tasks_path: "/tasks".to_string(),
            enable_cors: true,
            max_body_size: 1024 * 1024, // 1MB
            title: "Tasks".to_string(),
        }
    }
}

/// Builder for the HTTP task server
pub struct TaskHttpServerBuilder {
    config: ServerConfig,
    store: Arc<dyn TaskStore>,
}

impl TaskHttpServerBuilder {
    /// Create a new builder with an in-memory store (zero-configuration)
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryTaskStore::new()))
    }

    /// Create a new builder over a specific store
    pub fn with_store(store: Arc<dyn TaskStore>) -> Self {
        Self {
            config: ServerConfig::default(),
            store,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the bind address
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.config.bind_address = addr;
        self
    }

    /// Set the task collection path
    pub fn tasks_path(mut self, path: impl Into<String>) -> Self {
        self.config.tasks_path = path.into();
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enable: bool) -> Self {
        self.config.enable_cors = enable;
        self
    }

    /// Set maximum request body size
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Set the index page title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Build the HTTP task server
    pub fn build(self) -> TaskHttpServer {
        let config = Arc::new(self.config);
        let handler = TaskHttpHandler::new(Arc::clone(&config), self.store);
        TaskHttpServer { config, handler }
    }
}

impl Default for TaskHttpServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP task server
#[derive(Clone)]
pub struct TaskHttpServer {
    config: Arc<ServerConfig>,
    handler: TaskHttpHandler,
}

impl TaskHttpServer {
    /// Create a new builder with the default in-memory store
    pub fn builder() -> TaskHttpServerBuilder {
        TaskHttpServerBuilder::new()
    }

    /// Create a new builder over a specific store
    pub fn builder_with_store(store: Arc<dyn TaskStore>) -> TaskHttpServerBuilder {
        TaskHttpServerBuilder::with_store(store)
    }

    /// The active configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The request handler, usable without a socket
    pub fn handler(&self) -> &TaskHttpHandler {
        &self.handler
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(&self) -> Result<()> {
        let addr = self.config.bind_address;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| HttpTaskError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve connections accepted from an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        let store = self.handler.store();
        info!("HTTP task server listening on {}", local_addr);
        info!("Task endpoint available at: {}", self.config.tasks_path);
        info!(
            "Task store: {} ({} ids)",
            store.backend_name(),
            store.id_scheme()
        );

        loop {
            let (stream, peer_addr) = listener.accept().await?;
            debug!("New connection from {}", peer_addr);

            let handler = self.handler.clone();
            tokio::spawn(async move {
                let io = TokioIo::new(stream);
                let service = service_fn(move |req| {
                    let handler = handler.clone();
                    async move { Ok::<_, Infallible>(handler.handle_request(req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    // Filter out common client disconnection errors that aren't actual problems
                    let err_str = err.to_string();
                    if err_str.contains("connection closed before message completed") {
                        debug!("Client disconnected (normal): {}", err);
                    } else {
                        error!("Error serving connection: {}", err);
                    }
                }
            });
        }
    }

    /// Get server statistics
    pub async fn get_stats(&self) -> ServerStats {
        let store = self.handler.store();
        ServerStats {
            tasks: store.task_count().await.unwrap_or(0),
            store_type: store.backend_name().to_string(),
            id_scheme: store.id_scheme().to_string(),
        }
    }
}

/// Server statistics
#[derive(Debug, Clone)]
pub struct ServerStats {
    pub tasks: usize,
    pub store_type: String,
    pub id_scheme: String,
}

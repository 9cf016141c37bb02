//! Shared helpers for the end-to-end tests: a real server on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tasklist_http_server::{ServerConfig, TaskHttpServer};
use tasklist_store::{IdScheme, InMemoryTaskStore};

/// A server bound to `127.0.0.1:0`, stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default(), IdScheme::Stable).await
    }

    pub async fn start_with(config: ServerConfig, scheme: IdScheme) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let store = Arc::new(InMemoryTaskStore::with_id_scheme(scheme));
        let server = TaskHttpServer::builder_with_store(store)
            .config(config)
            .build();
        let handle = tokio::spawn(async move {
            if let Err(err) = server.serve(listener).await {
                eprintln!("test server stopped: {}", err);
            }
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

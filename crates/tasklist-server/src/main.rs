//! # Tasklist Server
//!
//! Serves the task API and the index page from an in-memory store.
//!
//! ## Usage
//! ```bash
//! cargo run -p tasklist-server -- --port 4567 --id-scheme positional
//! RUST_LOG=debug TASKLIST_PORT=8080 cargo run -p tasklist-server
//! ```

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tasklist_http_server::TaskHttpServer;
use tasklist_store::{IdScheme, InMemoryTaskStore};

#[derive(Parser, Debug)]
#[command(name = "tasklist-server")]
#[command(about = "In-memory task list with a JSON API")]
struct Args {
    /// Address to bind to
    #[arg(long, env = "TASKLIST_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "TASKLIST_PORT", default_value_t = 4567)]
    port: u16,

    /// How task ids are assigned: `stable` or `positional`
    #[arg(long, env = "TASKLIST_ID_SCHEME", default_value_t = IdScheme::Stable)]
    id_scheme: IdScheme,

    /// Path of the task collection endpoint
    #[arg(long, env = "TASKLIST_TASKS_PATH", default_value = "/tasks")]
    tasks_path: String,

    /// Disable CORS headers
    #[arg(long, env = "TASKLIST_NO_CORS")]
    no_cors: bool,

    /// Maximum request body size in bytes
    #[arg(long, env = "TASKLIST_MAX_BODY_SIZE", default_value_t = 1024 * 1024)]
    max_body_size: usize,

    /// Title shown on the index page
    #[arg(long, env = "TASKLIST_TITLE", default_value = "Tasks")]
    title: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let addr = SocketAddr::new(args.bind, args.port);

    info!("Starting tasklist server");
    info!("   Id scheme: {}", args.id_scheme);
    info!("   CORS: {}", if args.no_cors { "disabled" } else { "enabled" });

    let store = Arc::new(InMemoryTaskStore::with_id_scheme(args.id_scheme));
    let server = TaskHttpServer::builder_with_store(store)
        .bind_address(addr)
        .tasks_path(args.tasks_path)
        .cors(!args.no_cors)
        .max_body_size(args.max_body_size)
        .title(args.title)
        .build();

    server.run().await?;
    Ok(())
}

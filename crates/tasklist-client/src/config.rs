//! Configuration types for the task client

use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://127.0.0.1:4567`
    pub base_url: String,
    /// Path of the task collection endpoint
    pub tasks_path: String,
    /// Request timeout for individual operations
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4567".to_string(),
            tasks_path: "/tasks".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("tasklist-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

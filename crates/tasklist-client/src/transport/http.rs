//! HTTP transport for the task API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use tasklist_store::{TaskFields, TaskRecord};

use crate::config::ClientConfig;
use crate::error::{TaskClientError, TaskClientResult};
use crate::transport::TaskApi;

/// HTTP transport for the task API
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    /// HTTP client
    client: Client,
    /// Server origin (index page lives at its root)
    base: Url,
    /// Task collection endpoint
    tasks: Url,
}

impl HttpTaskApi {
    /// Create a transport for the server at `base_url` with default settings
    pub fn new(base_url: &str) -> TaskClientResult<Self> {
        Self::with_config(&ClientConfig::with_base_url(base_url))
    }

    /// Create a transport from a full configuration
    pub fn with_config(config: &ClientConfig) -> TaskClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Self::with_client(config, client)
    }

    /// Create a transport with a custom reqwest client
    pub fn with_client(config: &ClientConfig, client: Client) -> TaskClientResult<Self> {
        let base = Url::parse(&config.base_url)?;

        // Validate URL scheme
        if !matches!(base.scheme(), "http" | "https") {
            return Err(TaskClientError::InvalidUrl(format!(
                "Invalid scheme for HTTP transport: {}",
                base.scheme()
            )));
        }

        let tasks = base.join(&config.tasks_path)?;
        Ok(Self {
            client,
            base,
            tasks,
        })
    }

    /// The task collection endpoint
    pub fn tasks_url(&self) -> &Url {
        &self.tasks
    }

    fn task_url(&self, id: u64) -> TaskClientResult<Url> {
        Ok(self.base.join(&format!("{}/{}", self.tasks.path(), id))?)
    }

    /// Fetch the HTML index page (which carries the bootstrap snapshot)
    pub async fn index_page(&self) -> TaskClientResult<String> {
        let response = self.client.get(self.base.clone()).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }

    /// Turn non-success responses into `TaskClientError::Api`
    async fn check_status(response: Response) -> TaskClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("error")?.as_str().map(str::to_string))
            .unwrap_or(body);

        warn!("Task API error {}: {}", status, message);
        Err(TaskClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> TaskClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> TaskClientResult<Vec<TaskRecord>> {
        debug!("GET {}", self.tasks);
        let response = self.client.get(self.tasks.clone()).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, fields: TaskFields) -> TaskClientResult<TaskRecord> {
        debug!("POST {}", self.tasks);
        let response = self
            .client
            .post(self.tasks.clone())
            .json(&fields)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get(&self, id: u64) -> TaskClientResult<TaskRecord> {
        let url = self.task_url(id)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn update(&self, id: u64, fields: TaskFields) -> TaskClientResult<TaskRecord> {
        let url = self.task_url(id)?;
        debug!("PUT {}", url);
        let response = self.client.put(url).json(&fields).send().await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: u64) -> TaskClientResult<()> {
        let url = self.task_url(id)?;
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

//! HTTP request handler for the task API

use std::sync::Arc;

use bytes::Bytes;
use http_body::Body;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::{Method, Request, Response, StatusCode};
use tracing::{debug, error, warn};

use tasklist_store::{TaskFields, TaskStore, parse_fields};

use crate::page::render_index;
use crate::response::{ApiError, empty_ok, html_ok, json_ok, json_response};
use crate::routes::Route;
use crate::{CorsLayer, ServerConfig};

type ApiResult = std::result::Result<Response<Full<Bytes>>, ApiError>;
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP handler translating requests into task store operations
#[derive(Clone)]
pub struct TaskHttpHandler {
    pub(crate) config: Arc<ServerConfig>,
    pub(crate) store: Arc<dyn TaskStore>,
}

impl TaskHttpHandler {
    /// Create a new handler over `store`
    pub fn new(config: Arc<ServerConfig>, store: Arc<dyn TaskStore>) -> Self {
        Self { config, store }
    }

    /// The store this handler mutates
    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    /// Handle one HTTP request. Failures are rendered as JSON error responses.
    pub async fn handle_request<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        debug!("Handling {} {}", method, path);

        let mut response = match self.route(req).await {
            Ok(response) => response,
            Err(err) => {
                debug!("{} {} failed: {}", method, path, err);
                err.into_response()
            }
        };

        if self.config.enable_cors {
            CorsLayer::apply_cors_headers(response.headers_mut());
        }
        debug!("{} {} -> {}", method, path, response.status());
        response
    }

    async fn route<B>(&self, req: Request<B>) -> ApiResult
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        if req.method() == Method::OPTIONS {
            return Ok(json_response(StatusCode::OK, Bytes::new()));
        }

        let Some(route) = Route::parse(req.uri().path(), &self.config.tasks_path) else {
            return Err(ApiError::NotFound);
        };
        if !route.allows(req.method()) {
            return Err(ApiError::MethodNotAllowed {
                allow: route.allowed_methods(),
            });
        }

        match (route, req.method().clone()) {
            (Route::Index, _) => self.index().await,
            (Route::Tasks, Method::POST) => {
                let fields = self.read_fields(req).await?;
                self.create(fields).await
            }
            (Route::Tasks, _) => self.list().await,
            (Route::Task(id), Method::PUT) => {
                // Resolve the id before looking at the body: a missing task wins over a bad body
                self.store.get_task(id).await?;
                let fields = self.read_fields(req).await?;
                self.update(id, fields).await
            }
            (Route::Task(id), Method::DELETE) => self.delete(id).await,
            (Route::Task(id), _) => self.read(id).await,
        }
    }

    async fn index(&self) -> ApiResult {
        let tasks = self.store.list_tasks().await?;
        let page = render_index(&self.config.title, &tasks).map_err(|err| {
            error!("Failed to render index page: {}", err);
            ApiError::Internal
        })?;
        Ok(html_ok(page))
    }

    async fn list(&self) -> ApiResult {
        let tasks = self.store.list_tasks().await?;
        json_ok(&tasks)
    }

    async fn create(&self, fields: TaskFields) -> ApiResult {
        let task = self.store.create_task(fields).await?;
        json_ok(&task)
    }

    async fn read(&self, id: i64) -> ApiResult {
        let task = self.store.get_task(id).await?;
        json_ok(&task)
    }

    async fn update(&self, id: i64, fields: TaskFields) -> ApiResult {
        let task = self.store.update_task(id, fields).await?;
        json_ok(&task)
    }

    async fn delete(&self, id: i64) -> ApiResult {
        self.store.delete_task(id).await?;
        Ok(empty_ok())
    }

    /// Collect the request body (at most `max_body_size` bytes) and parse it
    /// as a JSON object
    async fn read_fields<B>(&self, req: Request<B>) -> std::result::Result<TaskFields, ApiError>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let limit = self.config.max_body_size;
        let body_bytes = match Limited::new(req.into_body(), limit).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(err) if err.is::<LengthLimitError>() => {
                warn!("Request body exceeds {} bytes", limit);
                return Err(ApiError::PayloadTooLarge);
            }
            Err(err) => {
                error!("Failed to read request body: {}", err);
                return Err(ApiError::MalformedBody);
            }
        };

        parse_fields(&body_bytes).map_err(|err| {
            warn!("Rejected task body: {}", err);
            ApiError::from(err)
        })
    }
}

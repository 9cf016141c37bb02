//! JSON responses and the API error mapping.
//!
//! Every error answers with a fixed `{"error": "<message>"}` body.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{ALLOW, CONTENT_TYPE, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tasklist_store::TaskStoreError;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const HTML_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Errors surfaced to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Task not found")]
    NotFound,

    #[error("Could not parse task JSON")]
    MalformedBody,

    #[error("Method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as a JSON error response.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let body = serde_json::json!({ "error": self.to_string() }).to_string();
        let mut response = json_response(self.status(), Bytes::from(body));
        if let ApiError::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

impl From<TaskStoreError> for ApiError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(_) => ApiError::NotFound,
            TaskStoreError::MalformedBody(_) => ApiError::MalformedBody,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(_: serde_json::Error) -> Self {
        ApiError::Internal
    }
}

/// Build a response with a JSON content type.
pub fn json_response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    with_content_type(status, body, JSON_CONTENT_TYPE)
}

/// Serialize `value` into a 200 JSON response.
pub fn json_ok<T: Serialize>(value: &T) -> Result<Response<Full<Bytes>>, ApiError> {
    let body = serde_json::to_vec(value)?;
    Ok(json_response(StatusCode::OK, Bytes::from(body)))
}

/// 200 with an empty body, still typed as JSON.
pub fn empty_ok() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, Bytes::new())
}

/// 200 HTML page.
pub fn html_ok(body: String) -> Response<Full<Bytes>> {
    with_content_type(StatusCode::OK, Bytes::from(body), HTML_CONTENT_TYPE)
}

fn with_content_type(
    status: StatusCode,
    body: Bytes,
    content_type: &'static str,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

//! REST API module for HTTP endpoints
//!
//! Ingestion:
//! - `POST /events` - Ingest a single event
//! - `POST /batch` - Ingest a batch of events
//! - `DELETE /events` - Clear the log
//!
//! Queries:
//! - `GET /stats` - Path statistics
//! - `GET /stats/choices?choice=knot:0` - Per-choice percentages
//! - `GET /sessions` - Session summaries
//! - `GET /top-paths?limit=N` - Most chosen-in paths
//! - `GET /events?limit=N&type=T&sessionId=S` - Raw events (debug)

pub mod events;
pub mod stats;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Raw query string pairs, keeping repeated keys (`?choice=a&choice=b`)
pub type QueryPairs = Vec<(String, String)>;

/// Non-empty values for `key`, in query order
pub fn query_values<'a>(pairs: &'a [(String, String)], key: &'a str) -> impl Iterator<Item = &'a str> {
    pairs
        .iter()
        .filter(move |(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.as_str())
}

/// First non-empty value for `key`
pub fn query_value<'a>(pairs: &'a [(String, String)], key: &'a str) -> Option<&'a str> {
    query_values(pairs, key).next()
}

/// Parse the `limit` parameter, falling back to `default` when absent
pub fn parse_limit(pairs: &[(String, String)], default: usize) -> Result<usize, ApiError> {
    match query_value(pairs, "limit") {
        Some(raw) => raw.trim().parse().map_err(|_| {
            ApiError::BadRequest(format!(
                "Invalid limit '{}': expected a non-negative integer",
                raw
            ))
        }),
        None => Ok(default),
    }
}

/// API error, rendered as `{"error": ..., "code": ...}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

/// API error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(_: serde_json::Error) -> Self {
        ApiError::BadRequest("Invalid JSON".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ApiErrorBody {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

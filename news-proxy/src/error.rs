use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Message returned to callers for every upstream failure.
pub const FAILURE_MESSAGE: &str = "Failed to fetch Tesla news";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("provider body is not JSON: {0}")]
    Body(#[from] serde_json::Error),
}

/// Errors leaving the HTTP surface. The caller only ever sees
/// `{"success": false, "error": FAILURE_MESSAGE}`.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("error fetching news: {0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "error fetching news");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": FAILURE_MESSAGE })),
        )
            .into_response()
    }
}

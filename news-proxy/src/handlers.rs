use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::ProxyError;
use crate::AppState;

/// Relays the provider's body byte for byte.
pub async fn tesla_news(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ProxyError> {
    let body: Bytes = state.provider.tesla_news().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

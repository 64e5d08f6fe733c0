use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;
pub mod upstream;

pub use error::{ProxyError, UpstreamError, FAILURE_MESSAGE};
pub use state::AppState;
pub use upstream::{check_body, NewsApiClient, NewsProvider};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route(news_core::NEWS_PATH, get(handlers::tesla_news))
        .layer(cors)
        .with_state(Arc::new(state))
}

use std::net::SocketAddr;
use std::time::Duration;

use news_core::PortalConfig;
use news_proxy::{create_app, AppState, NewsApiClient};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = PortalConfig::load()?;
    let api_key = config.proxy.require_api_key()?.to_owned();

    let http = NewsApiClient::build_http_client(Duration::from_secs(
        config.proxy.request_timeout_seconds,
    ))?;
    let provider = NewsApiClient::new(http, config.proxy.provider_url.clone(), api_key);
    let app = create_app(AppState::new(provider));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.proxy.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Backend is running on http://localhost:{}", config.proxy.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

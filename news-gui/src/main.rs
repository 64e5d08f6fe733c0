mod app;

use std::sync::Arc;

use eframe::{egui, NativeOptions};
use news_core::{config_dir, JsonFileStore, PortalConfig, Session};
use reqwest::ClientBuilder;
use tokio::runtime::Runtime;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app::{AppInit, PortalApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let config = load_config();
    let client = ClientBuilder::new()
        .user_agent(concat!("tesla-news/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client");

    let init = AppInit {
        runtime,
        client,
        proxy_url: config.client.proxy_url,
        session: load_session(),
    };

    eframe::run_native(
        "Tesla News Portal",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 850.0])
                .with_min_inner_size([700.0, 500.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(PortalApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load_config() -> PortalConfig {
    PortalConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration override, using defaults");
        PortalConfig::default()
    })
}

fn load_session() -> Session<JsonFileStore> {
    // Linux: ~/.config/tesla-news/session.json
    let dir = config_dir().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to the working directory for session storage");
        std::env::current_dir().unwrap_or_default()
    });
    let mut session = Session::new(JsonFileStore::open(dir.join("session.json")));
    session.load();
    session
}

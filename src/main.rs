use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod describe;
mod error;
mod speech;

use api::routes::{create_router, AppState};
use config::{key_presence, Config};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = Config::from_env().expect("Invalid configuration");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!("Scene relay v{}", config.app_version);
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Runtime mode: {}", config.mode.as_str());
    tracing::info!(
        gemini_api_key = key_presence(config.vision_api_key()),
        murf_api_key = key_presence(config.speech_api_key()),
        "Provider credentials"
    );
    tracing::info!("Static directory: {}", config.static_dir.display());

    let state = Arc::new(AppState::from_config(&config).expect("Failed to build app state"));

    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

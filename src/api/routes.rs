use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use crate::config::{Config, RuntimeMode};
use crate::describe::DescribeService;
use crate::error::AppError;
use crate::speech::SpeechService;

pub struct AppState {
    pub describe: DescribeService,
    pub speech: SpeechService,
    pub version: String,
    pub mode: RuntimeMode,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            describe: DescribeService::new(config.gemini.clone(), config.mode),
            speech: SpeechService::new(config.murf.clone(), config.mode)?,
            version: config.app_version.clone(),
            mode: config.mode,
        })
    }
}

pub fn create_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/describe", post(handlers::describe))
        .route("/text-to-speech", post(handlers::text_to_speech))
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.static_dir).append_index_html_on_directories(true))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
        .with_state(state)
}

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::config::ServerConfig;

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    match &config.allowed_origins {
        Some(origins) => {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "Ignoring unparseable allowed origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(parsed)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server);

    // Multipart bodies can legitimately reach max_files * max_file_size;
    // leave headroom for part headers and boundaries.
    let body_limit = state
        .config
        .upload
        .max_file_size
        .saturating_mul(state.config.upload.max_files)
        .saturating_add(1024 * 1024);

    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

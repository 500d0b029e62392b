//! API Module
//!
//! HTTP API layer for the proxy.

pub mod error;
pub mod health;
pub mod video;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Video endpoints
        .route("/api/generate-video", post(video::generate_video))
        .route("/api/poll-operation", post(video::poll_operation))
        .route("/api/download-video", post(video::download_video))
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

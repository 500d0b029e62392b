//! Health Check API Handler
//!
//! Liveness check. Also reports whether the provider credential is present,
//! since the proxy starts without it.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "configured": state.api_key().is_some(),
    }))
}

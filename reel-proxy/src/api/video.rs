//! Video API Handlers
//!
//! HTTP endpoints for the create → poll → download relay.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use reel_core::domain::operation::Operation;
use reel_core::domain::video::VIDEO_MIME_TYPE;
use reel_core::dto::video::{DownloadVideoRequest, GenerateVideoBody, PollOperationRequest};

use crate::api::error::{ApiError, ApiResult};
use crate::service::video_service;
use crate::state::AppState;

/// POST /api/generate-video
/// Start a generation and return the initial operation handle
pub async fn generate_video(
    State(state): State<AppState>,
    Json(body): Json<GenerateVideoBody>,
) -> ApiResult<Json<Operation>> {
    tracing::info!("Starting video generation (model {})", body.model);

    let operation = video_service::start_generation(&state, body).await?;

    Ok(Json(operation))
}

/// POST /api/poll-operation
/// Return the current state of an operation
pub async fn poll_operation(
    State(state): State<AppState>,
    Json(req): Json<PollOperationRequest>,
) -> ApiResult<Json<Operation>> {
    tracing::debug!("Polling operation: {}", req.operation.name);

    let operation = video_service::refresh_operation(&state, &req.operation).await?;

    Ok(Json(operation))
}

/// POST /api/download-video
/// Stream a finished video back to the caller as `video/mp4`
pub async fn download_video(
    State(state): State<AppState>,
    Json(req): Json<DownloadVideoRequest>,
) -> ApiResult<Response> {
    let upstream = video_service::open_download(&state, &req.uri).await?;

    let mut builder = Response::builder().header(header::CONTENT_TYPE, VIDEO_MIME_TYPE);
    if let Some(length) = upstream.content_length() {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    let response = builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::InternalError(format!("Failed to build response: {}", e)))?;

    Ok(response.into_response())
}

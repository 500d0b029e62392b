//! Video Service
//!
//! Business logic for the create → poll → download relay.

use reel_core::domain::operation::Operation;
use reel_core::dto::video::GenerateVideoBody;

use crate::provider::ProviderError;
use crate::state::AppState;

/// Service error type
#[derive(Debug)]
pub enum VideoError {
    NotConfigured,
    ValidationError(String),
    DisallowedUri(String),
    Provider(ProviderError),
}

impl From<ProviderError> for VideoError {
    fn from(err: ProviderError) -> Self {
        VideoError::Provider(err)
    }
}

/// Start a generation on the provider
pub async fn start_generation(
    state: &AppState,
    body: GenerateVideoBody,
) -> Result<Operation, VideoError> {
    let api_key = require_api_key(state)?;
    validate_body(&body)?;

    let operation = state.provider.create_operation(api_key, &body).await?;

    tracing::info!("Operation created: {} (model {})", operation.name, body.model);

    Ok(operation)
}

/// Fetch the latest state of an operation
pub async fn refresh_operation(
    state: &AppState,
    operation: &Operation,
) -> Result<Operation, VideoError> {
    let api_key = require_api_key(state)?;
    validate_operation_name(&operation.name)?;

    let current = state.provider.get_operation(api_key, &operation.name).await?;

    tracing::debug!(
        "Operation {} polled (done: {}, error: {})",
        current.name,
        current.done,
        current.error.is_some()
    );

    Ok(current)
}

/// Open the provider download for a finished video
///
/// Only provider URIs are fetched, since the credential is attached.
pub async fn open_download(state: &AppState, uri: &str) -> Result<reqwest::Response, VideoError> {
    let api_key = require_api_key(state)?;

    if uri.trim().is_empty() {
        return Err(VideoError::ValidationError("uri must not be empty".to_string()));
    }

    if !state.provider.is_provider_uri(uri) {
        return Err(VideoError::DisallowedUri(uri.to_string()));
    }

    tracing::info!("Downloading video: {}", uri);

    let response = state.provider.download(api_key, uri).await?;
    Ok(response)
}

fn require_api_key(state: &AppState) -> Result<&str, VideoError> {
    state.api_key().ok_or(VideoError::NotConfigured)
}

// =============================================================================
// Validation
// =============================================================================

fn validate_body(body: &GenerateVideoBody) -> Result<(), VideoError> {
    if body.model.is_empty()
        || !body
            .model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
    {
        return Err(VideoError::ValidationError(format!(
            "Invalid model name: {:?}",
            body.model
        )));
    }

    if body.prompt.trim().is_empty() {
        return Err(VideoError::ValidationError(
            "prompt must not be empty".to_string(),
        ));
    }

    if body.config.number_of_videos == 0 {
        return Err(VideoError::ValidationError(
            "numberOfVideos must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_operation_name(name: &str) -> Result<(), VideoError> {
    let valid = !name.is_empty()
        && !name.split('/').any(|segment| segment.is_empty() || segment == "..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/'));

    if valid {
        Ok(())
    } else {
        Err(VideoError::ValidationError(format!(
            "Invalid operation name: {:?}",
            name
        )))
    }
}

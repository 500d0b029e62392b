//! Job submitter

use reel_core::domain::operation::Operation;
use reel_core::domain::request::GenerationRequest;
use reel_core::prompt::build_generate_body;
use tracing::{debug, info};

use crate::backend::VideoBackend;
use crate::workflow::GenerationError;

/// Validates the request, builds the provider body and creates the operation
pub async fn submit<B>(backend: &B, request: &GenerationRequest) -> Result<Operation, GenerationError>
where
    B: VideoBackend + ?Sized,
{
    request.validate()?;

    let body = build_generate_body(request);
    info!(
        "Submitting {} job (model: {}, resolution: {}, aspect ratio: {})",
        request.mode, body.model, body.config.resolution, body.config.aspect_ratio
    );
    debug!("Composed prompt: {}", body.prompt);

    let operation = backend
        .create_operation(&body)
        .await
        .map_err(GenerationError::from_submission)?;

    info!("Operation created: {}", operation.name);

    Ok(operation)
}

//! Artifact retriever

use reel_core::domain::video::VideoBlob;
use tracing::info;

use crate::backend::VideoBackend;
use crate::workflow::GenerationError;

/// Downloads the finished video
///
/// Failures here never trigger a new generation. A missing proxy credential
/// is still reported as a configuration error.
pub async fn retrieve<B>(backend: &B, uri: &str) -> Result<VideoBlob, GenerationError>
where
    B: VideoBackend + ?Sized,
{
    let video = backend
        .download_video(uri)
        .await
        .map_err(GenerationError::from_retrieval)?;

    if video.is_empty() {
        return Err(GenerationError::Retrieval(
            "proxy returned an empty video".to_string(),
        ));
    }

    info!("Retrieved {} bytes ({})", video.len(), video.mime_type);

    Ok(video)
}

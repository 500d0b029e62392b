//! Prompt composition and request payload building
//!
//! Everything here is pure: the same request always yields the same body.

use crate::domain::request::{GenerationRequest, MAX_REFERENCE_IMAGES, VideoMode};
use crate::dto::video::{GenerateVideoBody, ImageBytes, ReferenceImage, ReferenceType, VideoConfig};

/// Fast model used for every mode except references
pub const FAST_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Higher-fidelity model used for references mode
pub const PRO_MODEL: &str = "veo-3.1-generate-preview";

pub const VISUAL_ENHANCEMENT: &str =
    "8k resolution, photorealistic, cinematic lighting, masterpiece, hyper-detailed.";

pub const AVATAR_ENHANCEMENT: &str = "High-quality digital human, professional news broadcast style, \
flawless lip synchronization, studio lighting, 8k resolution, \
photorealistic skin textures, cinematic depth of field. \
The character should speak the script naturally with facial expressions.";

/// Picks the model for a generation mode
pub fn select_model(mode: VideoMode) -> &'static str {
    match mode {
        VideoMode::ReferencesToVideo => PRO_MODEL,
        _ => FAST_MODEL,
    }
}

/// Builds the prompt string sent to the provider
pub fn compose_prompt(mode: VideoMode, prompt: &str, script: Option<&str>) -> String {
    match mode {
        VideoMode::Avatar => format!(
            "[SCENE: {}] [SCRIPT: {}] {}",
            prompt,
            script.unwrap_or_default(),
            AVATAR_ENHANCEMENT
        ),
        _ => format!("{}, {}", prompt, VISUAL_ENHANCEMENT),
    }
}

/// Builds the `POST /api/generate-video` body for a request
///
/// Assets that do not belong to the request's mode are dropped. In frames
/// mode a looping request reuses the start frame as the last frame.
pub fn build_generate_body(request: &GenerationRequest) -> GenerateVideoBody {
    let mut body = GenerateVideoBody {
        model: select_model(request.mode).to_string(),
        prompt: compose_prompt(request.mode, &request.prompt, request.script.as_deref()),
        config: VideoConfig {
            number_of_videos: 1,
            resolution: request.resolution,
            aspect_ratio: request.aspect_ratio,
            last_frame: None,
        },
        image: None,
        reference_images: None,
    };

    match request.mode {
        VideoMode::FramesToVideo => {
            body.image = request.start_frame.as_deref().map(ImageBytes::png);
            body.config.last_frame = request.end_frame.as_deref().map(ImageBytes::png);
            if request.is_looping() && request.start_frame.is_some() {
                body.config.last_frame = body.image.clone();
            }
        }
        VideoMode::ReferencesToVideo => {
            body.reference_images = request.reference_images.as_ref().map(|images| {
                images
                    .iter()
                    .take(MAX_REFERENCE_IMAGES)
                    .map(|image| ReferenceImage {
                        image: ImageBytes::png(image.as_str()),
                        reference_type: ReferenceType::Asset,
                    })
                    .collect()
            });
        }
        VideoMode::TextToVideo | VideoMode::Avatar => {}
    }

    body
}

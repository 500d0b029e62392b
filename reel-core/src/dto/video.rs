//! Video generation DTOs
//!
//! Bodies of `POST /api/generate-video`, `/api/poll-operation` and
//! `/api/download-video`.

use serde::{Deserialize, Serialize};

use crate::domain::operation::Operation;
use crate::domain::request::{AspectRatio, Resolution};

/// MIME type attached to every uploaded frame or reference image
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// Request body of `POST /api/generate-video`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoBody {
    pub model: String,
    pub prompt: String,
    pub config: VideoConfig,
    /// Start frame (frames mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageBytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_images: Option<Vec<ReferenceImage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
    pub number_of_videos: u32,
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_frame: Option<ImageBytes>,
}

/// Base64 image payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBytes {
    pub image_bytes: String,
    pub mime_type: String,
}

impl ImageBytes {
    pub fn png(image_bytes: impl Into<String>) -> Self {
        Self {
            image_bytes: image_bytes.into(),
            mime_type: IMAGE_MIME_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceImage {
    pub image: ImageBytes,
    #[serde(default)]
    pub reference_type: ReferenceType,
}

/// How the provider should use a reference image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    #[default]
    Asset,
    Style,
}

/// Request body of `POST /api/poll-operation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOperationRequest {
    pub operation: Operation,
}

/// Request body of `POST /api/download-video`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadVideoRequest {
    pub uri: String,
}

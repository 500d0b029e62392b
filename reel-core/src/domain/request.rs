//! Generation request domain types

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every generated clip has the same length.
pub const VIDEO_DURATION_SECS: u32 = 7;

/// Maximum number of reference images accepted in references mode
pub const MAX_REFERENCE_IMAGES: usize = 3;

/// Generation mode
///
/// Exactly one mode is active per request and it decides which optional
/// fields of [`GenerationRequest`] are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoMode {
    TextToVideo,
    FramesToVideo,
    ReferencesToVideo,
    Avatar,
}

impl std::fmt::Display for VideoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoMode::TextToVideo => write!(f, "TEXT_TO_VIDEO"),
            VideoMode::FramesToVideo => write!(f, "FRAMES_TO_VIDEO"),
            VideoMode::ReferencesToVideo => write!(f, "REFERENCES_TO_VIDEO"),
            VideoMode::Avatar => write!(f, "AVATAR"),
        }
    }
}

/// Output resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "720p" => Ok(Resolution::P720),
            "1080p" => Ok(Resolution::P1080),
            other => Err(ValidationError::UnknownValue {
                field: "resolution",
                value: other.to_string(),
            }),
        }
    }
}

/// Output aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            other => Err(ValidationError::UnknownValue {
                field: "aspect ratio",
                value: other.to_string(),
            }),
        }
    }
}

/// User-supplied parameters for a single video generation
///
/// Image assets are carried as base64 text. Fields that do not belong to the
/// active [`VideoMode`] are ignored when the request payload is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub mode: VideoMode,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
    /// Always [`VIDEO_DURATION_SECS`]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
}

impl GenerationRequest {
    /// Create a request with the required fields and no assets
    pub fn new(
        mode: VideoMode,
        prompt: impl Into<String>,
        resolution: Resolution,
        aspect_ratio: AspectRatio,
    ) -> Self {
        Self {
            mode,
            prompt: prompt.into(),
            script: None,
            resolution,
            aspect_ratio,
            duration: VIDEO_DURATION_SECS,
            start_frame: None,
            end_frame: None,
            reference_images: None,
            looping: None,
        }
    }

    /// Set the spoken script (avatar mode)
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Set the base64 start frame (frames mode)
    pub fn with_start_frame(mut self, frame: impl Into<String>) -> Self {
        self.start_frame = Some(frame.into());
        self
    }

    /// Set the base64 end frame (frames mode)
    pub fn with_end_frame(mut self, frame: impl Into<String>) -> Self {
        self.end_frame = Some(frame.into());
        self
    }

    /// Add a base64 reference image (references mode)
    pub fn with_reference_image(mut self, image: impl Into<String>) -> Self {
        self.reference_images
            .get_or_insert_with(Vec::new)
            .push(image.into());
        self
    }

    /// Request a looping clip (frames mode)
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    pub fn is_looping(&self) -> bool {
        self.looping.unwrap_or(false)
    }

    /// Checks the request before it is submitted
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        if self.duration != VIDEO_DURATION_SECS {
            return Err(ValidationError::UnsupportedDuration(self.duration));
        }

        match self.mode {
            VideoMode::FramesToVideo => {
                if let Some(frame) = &self.start_frame {
                    check_base64("start frame", frame)?;
                }
                if let Some(frame) = &self.end_frame {
                    check_base64("end frame", frame)?;
                }
            }
            VideoMode::ReferencesToVideo => {
                let images = self.reference_images.as_deref().unwrap_or_default();
                if images.len() > MAX_REFERENCE_IMAGES {
                    return Err(ValidationError::TooManyReferences(images.len()));
                }
                for image in images {
                    check_base64("reference image", image)?;
                }
            }
            VideoMode::TextToVideo | VideoMode::Avatar => {}
        }

        Ok(())
    }
}

fn check_base64(field: &'static str, value: &str) -> Result<(), ValidationError> {
    STANDARD
        .decode(value)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidAsset(field))
}

/// Request validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("at most 3 reference images are allowed, got {0}")]
    TooManyReferences(usize),

    #[error("{0} is not valid base64")]
    InvalidAsset(&'static str),

    #[error("only 7s clips are supported, got {0}s")]
    UnsupportedDuration(u32),

    #[error("unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_request() -> GenerationRequest {
        GenerationRequest::new(
            VideoMode::TextToVideo,
            "a red fox in snow",
            Resolution::P720,
            AspectRatio::Portrait,
        )
    }

    #[test]
    fn test_new_request_uses_fixed_duration() {
        assert_eq!(text_request().duration, VIDEO_DURATION_SECS);
    }

    #[test]
    fn test_request_serializes_with_ui_field_names() {
        let json = serde_json::to_value(text_request()).unwrap();
        assert_eq!(json["mode"], "TEXT_TO_VIDEO");
        assert_eq!(json["resolution"], "720p");
        assert_eq!(json["aspectRatio"], "9:16");
        assert!(json.get("script").is_none());
    }

    #[test]
    fn test_validate_rejects_blank_prompt() {
        let mut request = text_request();
        request.prompt = "   ".to_string();
        assert_eq!(request.validate(), Err(ValidationError::EmptyPrompt));
    }

    #[test]
    fn test_validate_rejects_too_many_references() {
        let mut request = text_request();
        request.mode = VideoMode::ReferencesToVideo;
        for _ in 0..4 {
            request = request.with_reference_image("aGVsbG8=");
        }
        assert_eq!(request.validate(), Err(ValidationError::TooManyReferences(4)));
    }

    #[test]
    fn test_validate_rejects_bad_base64_frame() {
        let mut request = text_request().with_start_frame("not base64!!");
        request.mode = VideoMode::FramesToVideo;
        assert_eq!(
            request.validate(),
            Err(ValidationError::InvalidAsset("start frame"))
        );
    }

    #[test]
    fn test_validate_ignores_assets_of_other_modes() {
        let request = text_request().with_start_frame("not base64!!");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_parse_resolution_and_aspect_ratio() {
        assert_eq!("1080p".parse::<Resolution>().unwrap(), Resolution::P1080);
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
        assert!("4k".parse::<Resolution>().is_err());
        assert!("1:1".parse::<AspectRatio>().is_err());
    }
}

//! Generated video artifacts

use chrono::{DateTime, Utc};
use std::path::Path;
use uuid::Uuid;

use crate::domain::request::GenerationRequest;

pub const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Downloaded video bytes held in memory
#[derive(Clone, PartialEq, Eq)]
pub struct VideoBlob {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl VideoBlob {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Writes the bytes to `path` and returns a `file://` URL for it
    pub fn save_to(&self, path: &Path) -> std::io::Result<String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.data)?;
        let absolute = std::fs::canonicalize(path)?;
        Ok(format!("file://{}", absolute.display()))
    }
}

impl std::fmt::Debug for VideoBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoBlob")
            .field("len", &self.data.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// A finished generation, owned by the caller
///
/// Created once, after the artifact has been retrieved. Never mutated.
#[derive(Debug, Clone)]
pub struct VideoResult {
    pub id: Uuid,
    pub video: VideoBlob,
    pub request: GenerationRequest,
    pub created_at: DateTime<Utc>,
}

impl VideoResult {
    pub fn new(video: VideoBlob, request: GenerationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            video,
            request,
            created_at: Utc::now(),
        }
    }
}

//! Long-running operation domain types
//!
//! The provider answers a generation request with an [`Operation`] handle that
//! is re-fetched until it reports `done` or an error. The wire shape is the
//! one the proxy returns to its callers: `{name, done, error, response}`.

use serde::{Deserialize, Serialize};

/// Handle to a provider-side long-running operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Opaque operation identifier assigned by the provider
    pub name: String,

    #[serde(default)]
    pub done: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<OperationResponse>,
}

/// Error status reported by the provider for an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.code, self.message)
    }
}

/// Payload of a finished operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    #[serde(default)]
    pub generated_videos: Vec<GeneratedVideo>,

    /// Number of outputs removed by the provider's content filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rai_media_filtered_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rai_media_filtered_reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedVideo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoFile>,
}

/// Provider file reference for a generated video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Poll state machine
///
/// `Pending` is the only non-terminal state. `TimedOut` and `Cancelled` are
/// decided by the poller, never by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollState {
    Pending,
    Done,
    Failed,
    TimedOut,
    Cancelled,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Pending)
    }
}

impl std::fmt::Display for PollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollState::Pending => write!(f, "Pending"),
            PollState::Done => write!(f, "Done"),
            PollState::Failed => write!(f, "Failed"),
            PollState::TimedOut => write!(f, "TimedOut"),
            PollState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl Operation {
    /// Create a fresh, unfinished handle
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Classifies the handle as observed
    ///
    /// An error wins over the `done` flag.
    pub fn state(&self) -> PollState {
        if self.error.is_some() {
            PollState::Failed
        } else if self.done {
            PollState::Done
        } else {
            PollState::Pending
        }
    }

    /// URI of the first generated video, if the operation produced one
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generated_videos
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
    }

    /// Reasons given by the content filter, empty when nothing was filtered
    pub fn filtered_reasons(&self) -> &[String] {
        self.response
            .as_ref()
            .map(|r| r.rai_media_filtered_reasons.as_slice())
            .unwrap_or_default()
    }

    /// Whether the provider's content filter removed the output
    pub fn is_content_filtered(&self) -> bool {
        self.response.as_ref().is_some_and(|r| {
            r.rai_media_filtered_count.unwrap_or(0) > 0 || !r.rai_media_filtered_reasons.is_empty()
        })
    }
}

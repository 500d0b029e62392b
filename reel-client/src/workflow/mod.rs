//! Generation workflow
//!
//! Submit → poll → retrieve, as three small stateless steps over a
//! [`VideoBackend`]. The caller owns every piece of mutable state: the
//! [`Operation`](reel_core::domain::operation::Operation) handle is passed by
//! value between steps, and jobs running side by side share nothing.

mod error;
mod poller;
mod retriever;
mod submitter;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{GenerationError, INTERNAL_ERROR_CODE};
pub use poller::{CompletedOperation, PollPolicy, poll_until_done};
pub use retriever::retrieve;
pub use submitter::submit;

use reel_core::domain::request::GenerationRequest;
use reel_core::domain::video::VideoResult;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::backend::VideoBackend;

/// Progress notifications emitted while a job runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The creation call is about to be sent
    Submitting,
    /// The provider accepted the job
    Submitted { operation: String },
    /// A status query is about to be issued
    Rendering { poll: u32, elapsed: Duration },
    /// The finished video is being downloaded
    Downloading,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Progress::Submitting => write!(f, "Submitting prompt..."),
            Progress::Submitted { operation } => write!(f, "Job accepted ({})", operation),
            Progress::Rendering { elapsed, .. } => {
                write!(f, "Rendering ({}s)...", elapsed.as_secs())
            }
            Progress::Downloading => write!(f, "Syncing video stream..."),
        }
    }
}

/// Runs a whole job: submit, poll until terminal, download
///
/// # Arguments
/// * `backend` - Where the calls go (usually a [`crate::ProxyClient`])
/// * `request` - The user's generation parameters
/// * `policy` - Poll interval and budget
/// * `cancel` - Checked before every poll; cancellation skips retrieval
/// * `on_progress` - Receives a notification at each step
pub async fn generate_video<B, F>(
    backend: &B,
    request: GenerationRequest,
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut on_progress: F,
) -> Result<VideoResult, GenerationError>
where
    B: VideoBackend + ?Sized,
    F: FnMut(Progress) + Send,
{
    on_progress(Progress::Submitting);
    let operation = submit(backend, &request).await?;
    on_progress(Progress::Submitted {
        operation: operation.name.clone(),
    });

    let completed = poll_until_done(backend, operation, policy, cancel, &mut on_progress).await?;

    on_progress(Progress::Downloading);
    let video = retrieve(backend, &completed.video_uri).await?;

    info!(
        "Generation {} finished after {} poll(s), {} bytes",
        completed.operation.name,
        completed.polls,
        video.len()
    );

    Ok(VideoResult::new(video, request))
}

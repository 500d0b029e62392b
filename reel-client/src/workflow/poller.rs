//! Operation poller
//!
//! Drives an operation handle through the poll state machine:
//!
//! ```text
//! Pending ──error──▶ Failed
//!    │ ──done──────▶ Done
//!    │ ──N polls──▶ TimedOut
//!    │ ──cancel───▶ Cancelled
//!    └──query──────▶ Pending
//! ```
//!
//! The budget is a fixed number of polls at a fixed interval, not a wall
//! clock deadline.

use reel_core::domain::operation::{Operation, PollState};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::VideoBackend;
use crate::workflow::{GenerationError, Progress};

/// Interval and budget for status queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait before each status query
    pub interval: Duration,
    /// Number of status queries after which a pending operation times out
    pub max_polls: u32,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);
    pub const DEFAULT_MAX_POLLS: u32 = 60;

    pub fn new(interval: Duration, max_polls: u32) -> Self {
        Self {
            interval,
            max_polls,
        }
    }

    /// Approximate wall-clock budget (`interval × max_polls`)
    pub fn budget(&self) -> Duration {
        self.elapsed_after(self.max_polls)
    }

    /// Elapsed-time estimate after `polls` waits, saturating at `Duration::MAX`
    pub fn elapsed_after(&self, polls: u32) -> Duration {
        self.interval.saturating_mul(polls)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_MAX_POLLS)
    }
}

/// A finished operation and the URI of its video
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedOperation {
    pub operation: Operation,
    pub video_uri: String,
    /// Status queries issued before the operation finished
    pub polls: u32,
}

/// Polls `operation` until it reaches a terminal state
///
/// The handle returned by submission is classified first, so an operation
/// that is already finished costs no status queries. `on_progress` receives a
/// [`Progress::Rendering`] notification before every query.
pub async fn poll_until_done<B, F>(
    backend: &B,
    mut operation: Operation,
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut on_progress: F,
) -> Result<CompletedOperation, GenerationError>
where
    B: VideoBackend + ?Sized,
    F: FnMut(Progress) + Send,
{
    let mut polls: u32 = 0;

    loop {
        match operation.state() {
            PollState::Failed => {
                // state() only reports Failed when an error is present
                let error = operation.error.as_ref().map_or_else(
                    || GenerationError::MissingArtifact {
                        name: operation.name.clone(),
                    },
                    GenerationError::from_operation_error,
                );
                warn!("Operation {} failed: {}", operation.name, error);
                return Err(error);
            }
            PollState::Done => return complete(operation, polls),
            _ => {}
        }

        if polls >= policy.max_polls {
            warn!(
                "Operation {} still pending after {} polls, giving up",
                operation.name, polls
            );
            return Err(GenerationError::Timeout { polls });
        }

        if cancel.is_cancelled() {
            info!("Polling of {} cancelled", operation.name);
            return Err(GenerationError::Cancelled);
        }

        polls += 1;
        on_progress(Progress::Rendering {
            poll: polls,
            elapsed: policy.elapsed_after(polls),
        });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Polling of {} cancelled", operation.name);
                return Err(GenerationError::Cancelled);
            }
            _ = tokio::time::sleep(policy.interval) => {}
        }

        debug!("Polling {} ({}/{})", operation.name, polls, policy.max_polls);
        operation = backend
            .poll_operation(&operation)
            .await
            .map_err(GenerationError::from_poll_request)?;
    }
}

fn complete(operation: Operation, polls: u32) -> Result<CompletedOperation, GenerationError> {
    let Some(video_uri) = operation.video_uri().map(str::to_string) else {
        let error = GenerationError::from_empty_operation(&operation);
        warn!("Operation {} finished without a video: {}", operation.name, error);
        return Err(error);
    };

    info!("Operation {} done after {} poll(s)", operation.name, polls);

    Ok(CompletedOperation {
        operation,
        video_uri,
        polls,
    })
}

//! Scripted fake backend for workflow tests

use async_trait::async_trait;
use reel_core::domain::operation::{
    GeneratedVideo, Operation, OperationError, OperationResponse, VideoFile,
};
use reel_core::domain::video::{VIDEO_MIME_TYPE, VideoBlob};
use reel_core::dto::video::GenerateVideoBody;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::backend::VideoBackend;
use crate::error::{ClientError, Result};

const OPERATION_NAME: &str = "models/veo-3.1-fast-generate-preview/operations/op-1";

type ErrorFactory = Box<dyn Fn() -> ClientError + Send + Sync>;

pub(crate) fn pending() -> Operation {
    Operation::pending(OPERATION_NAME)
}

pub(crate) fn done_with_uri(uri: &str) -> Operation {
    Operation {
        name: OPERATION_NAME.to_string(),
        done: true,
        error: None,
        response: Some(OperationResponse {
            generated_videos: vec![GeneratedVideo {
                video: Some(VideoFile {
                    uri: Some(uri.to_string()),
                    mime_type: Some(VIDEO_MIME_TYPE.to_string()),
                }),
            }],
            ..Default::default()
        }),
    }
}

pub(crate) fn failed(code: i32, message: &str) -> Operation {
    Operation {
        name: OPERATION_NAME.to_string(),
        done: false,
        error: Some(OperationError {
            code,
            message: message.to_string(),
        }),
        response: None,
    }
}

/// Returns `created` from the creation call, then the scripted poll answers
/// in order. Once the script runs out every poll answers pending.
pub(crate) struct FakeBackend {
    created: Operation,
    polls: Mutex<VecDeque<Operation>>,
    video: Vec<u8>,
    create_error: Option<ErrorFactory>,
    download_error: Option<ErrorFactory>,
    submitted: Mutex<Option<GenerateVideoBody>>,
    poll_calls: AtomicU32,
    downloads: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub(crate) fn new(created: Operation, polls: Vec<Operation>) -> Self {
        Self {
            created,
            polls: Mutex::new(polls.into()),
            video: b"video".to_vec(),
            create_error: None,
            download_error: None,
            submitted: Mutex::new(None),
            poll_calls: AtomicU32::new(0),
            downloads: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_video(mut self, video: Vec<u8>) -> Self {
        self.video = video;
        self
    }

    pub(crate) fn with_create_error(
        mut self,
        error: impl Fn() -> ClientError + Send + Sync + 'static,
    ) -> Self {
        self.create_error = Some(Box::new(error));
        self
    }

    pub(crate) fn with_download_error(
        mut self,
        error: impl Fn() -> ClientError + Send + Sync + 'static,
    ) -> Self {
        self.download_error = Some(Box::new(error));
        self
    }

    pub(crate) fn submitted_body(&self) -> Option<GenerateVideoBody> {
        self.submitted.lock().unwrap().clone()
    }

    pub(crate) fn poll_calls(&self) -> u32 {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn downloaded_uris(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoBackend for FakeBackend {
    async fn create_operation(&self, body: &GenerateVideoBody) -> Result<Operation> {
        *self.submitted.lock().unwrap() = Some(body.clone());
        match &self.create_error {
            Some(error) => Err(error()),
            None => Ok(self.created.clone()),
        }
    }

    async fn poll_operation(&self, operation: &Operation) -> Result<Operation> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.polls.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| Operation::pending(operation.name.clone())))
    }

    async fn download_video(&self, uri: &str) -> Result<VideoBlob> {
        self.downloads.lock().unwrap().push(uri.to_string());
        match &self.download_error {
            Some(error) => Err(error()),
            None => Ok(VideoBlob::new(self.video.clone(), VIDEO_MIME_TYPE)),
        }
    }
}

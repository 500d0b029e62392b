//! Video generation API endpoints

use reel_core::domain::operation::Operation;
use reel_core::domain::video::{VIDEO_MIME_TYPE, VideoBlob};
use reel_core::dto::video::{DownloadVideoRequest, GenerateVideoBody, PollOperationRequest};

use crate::ProxyClient;
use crate::error::Result;

impl ProxyClient {
    /// Start a generation on the provider
    ///
    /// # Arguments
    /// * `body` - The provider request body (model, prompt, config, assets)
    ///
    /// # Returns
    /// The freshly created operation handle
    pub async fn generate_video(&self, body: &GenerateVideoBody) -> Result<Operation> {
        let url = format!("{}/api/generate-video", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the current state of an operation
    ///
    /// # Arguments
    /// * `operation` - The last observed handle
    ///
    /// # Returns
    /// The updated handle
    pub async fn poll_operation(&self, operation: &Operation) -> Result<Operation> {
        let url = format!("{}/api/poll-operation", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&PollOperationRequest {
                operation: operation.clone(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Download a generated video through the proxy
    ///
    /// # Arguments
    /// * `uri` - Retrieval URI taken from the finished operation
    pub async fn download_video(&self, uri: &str) -> Result<VideoBlob> {
        let url = format!("{}/api/download-video", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&DownloadVideoRequest {
                uri: uri.to_string(),
            })
            .send()
            .await?;

        let (data, content_type) = self.handle_bytes_response(response).await?;
        Ok(VideoBlob::new(
            data,
            content_type.unwrap_or_else(|| VIDEO_MIME_TYPE.to_string()),
        ))
    }
}

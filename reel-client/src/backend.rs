//! Backend seam for the generation workflow
//!
//! The workflow only needs three calls. [`ProxyClient`] provides them over
//! HTTP; tests provide a scripted fake.

use async_trait::async_trait;
use reel_core::domain::operation::Operation;
use reel_core::domain::video::VideoBlob;
use reel_core::dto::video::GenerateVideoBody;

use crate::ProxyClient;
use crate::error::Result;

/// Operations the workflow issues against the provider
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// Issues the operation-creation call
    async fn create_operation(&self, body: &GenerateVideoBody) -> Result<Operation>;

    /// Issues one status query for `operation`
    async fn poll_operation(&self, operation: &Operation) -> Result<Operation>;

    /// Fetches the bytes behind a retrieval URI
    async fn download_video(&self, uri: &str) -> Result<VideoBlob>;
}

#[async_trait]
impl VideoBackend for ProxyClient {
    async fn create_operation(&self, body: &GenerateVideoBody) -> Result<Operation> {
        self.generate_video(body).await
    }

    async fn poll_operation(&self, operation: &Operation) -> Result<Operation> {
        ProxyClient::poll_operation(self, operation).await
    }

    async fn download_video(&self, uri: &str) -> Result<VideoBlob> {
        ProxyClient::download_video(self, uri).await
    }
}

//! Reel HTTP Client
//!
//! A type-safe HTTP client for the Reel proxy API, plus the generation
//! workflow built on top of it: submit a request, poll the long-running
//! operation, download the finished video.
//!
//! # Example
//!
//! ```no_run
//! use reel_client::{PollPolicy, ProxyClient, workflow};
//! use reel_core::domain::request::{AspectRatio, GenerationRequest, Resolution, VideoMode};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ProxyClient::new("http://localhost:3000");
//!     let request = GenerationRequest::new(
//!         VideoMode::TextToVideo,
//!         "a red fox in snow",
//!         Resolution::P720,
//!         AspectRatio::Portrait,
//!     );
//!
//!     let result = workflow::generate_video(
//!         &client,
//!         request,
//!         &PollPolicy::default(),
//!         &CancellationToken::new(),
//!         |progress| println!("{}", progress),
//!     )
//!     .await?;
//!
//!     println!("Downloaded {} bytes", result.video.len());
//!     Ok(())
//! }
//! ```

mod backend;
pub mod error;
mod video;
pub mod workflow;

// Re-export commonly used types
pub use backend::VideoBackend;
pub use error::{ClientError, Result};
pub use workflow::{GenerationError, PollPolicy, Progress};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Reel proxy API
///
/// Covers the three proxy endpoints:
/// - operation creation (`/api/generate-video`)
/// - operation status (`/api/poll-operation`)
/// - video download (`/api/download-video`)
///
/// The provider credential lives in the proxy and never passes through here.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    /// Base URL of the proxy (e.g., "http://localhost:3000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ProxyClient {
    /// Create a new proxy client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the proxy (e.g., "http://localhost:3000")
    ///
    /// # Example
    /// ```
    /// use reel_client::ProxyClient;
    ///
    /// let client = ProxyClient::new("http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new proxy client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the proxy
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response carrying a raw body
    async fn handle_bytes_response(&self, response: reqwest::Response) -> Result<(Vec<u8>, Option<String>)> {
        let response = Self::check_status(response).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok((bytes.to_vec(), content_type))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

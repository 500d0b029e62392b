//! Provider error types

use thiserror::Error;

/// Errors raised while talking to the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed before a response arrived
    #[error("provider request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Provider answered with a body we could not read
    #[error("failed to parse provider response: {0}")]
    ParseError(String),
}

impl ProviderError {
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        Self::Status {
            status,
            message: extract_message(&body),
        }
    }
}

/// Pulls `error.message` out of a Google-style error body
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

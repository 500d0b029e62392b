//! Error types for the Reel client

use reel_core::dto::error::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the proxy
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Proxy returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the proxy
        message: String,
        /// Machine-readable error code, when the proxy sent one
        code: Option<String>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from a status code and the raw response body
    ///
    /// JSON error bodies produced by the proxy are unpacked; anything else is
    /// kept verbatim as the message.
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => Self::ApiError {
                status,
                message: parsed.error,
                code: parsed.code,
            },
            Err(_) => Self::ApiError {
                status,
                message: body,
                code: None,
            },
        }
    }

    /// Check if the proxy reported a missing provider credential
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ApiError { code: Some(code), .. }
                if code == reel_core::dto::error::CONFIGURATION_ERROR_CODE
        )
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

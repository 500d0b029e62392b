//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reel_core::dto::error::{CONFIGURATION_ERROR_CODE, ErrorBody};

use crate::config::API_KEY_VAR;
use crate::provider::ProviderError;
use crate::service::video_service::VideoError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotConfigured,
    BadRequest(String),
    Upstream(ProviderError),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotConfigured => {
                tracing::error!("{} is not set, refusing request", API_KEY_VAR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: format!("{} environment variable is not set", API_KEY_VAR),
                        message: Some(
                            "Server configuration error, please contact the administrator"
                                .to_string(),
                        ),
                        code: Some(CONFIGURATION_ERROR_CODE.to_string()),
                    },
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ApiError::Upstream(err) => {
                tracing::error!("Provider error: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        error: err.to_string(),
                        message: Some("Request failed, please try again later".to_string()),
                        code: None,
                    },
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<VideoError> for ApiError {
    fn from(err: VideoError) -> Self {
        match err {
            VideoError::NotConfigured => ApiError::NotConfigured,
            VideoError::ValidationError(msg) => ApiError::BadRequest(msg),
            VideoError::DisallowedUri(uri) => {
                ApiError::BadRequest(format!("Refusing to download from {}", uri))
            }
            VideoError::Provider(err) => ApiError::Upstream(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

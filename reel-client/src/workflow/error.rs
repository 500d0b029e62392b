//! Workflow error taxonomy

use reel_core::domain::operation::{Operation, OperationError};
use reel_core::domain::request::ValidationError;
use thiserror::Error;

use crate::error::ClientError;

/// Provider error code for an internal failure
pub const INTERNAL_ERROR_CODE: i32 = 13;

/// Terminal failures of a generation job
///
/// Nothing is retried automatically; each variant carries enough detail for
/// the caller to decide whether to resubmit.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The proxy has no provider credential
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request was rejected before submission
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The creation call failed
    #[error("submission failed: {0}")]
    Submission(#[source] ClientError),

    /// A status query could not be completed
    #[error("status query failed: {0}")]
    PollRequest(#[source] ClientError),

    /// The provider reported an error on the operation
    #[error("API Error {code}: {message}")]
    Poll { code: i32, message: String },

    /// The provider refused the content on safety grounds
    ///
    /// `code` is the provider's error code when the rejection came as an
    /// operation error.
    #[error("content rejected by safety policy: {message}")]
    PolicyViolation { code: Option<i32>, message: String },

    /// The poll budget ran out while the operation was still pending
    #[error("operation did not finish after {polls} polls")]
    Timeout { polls: u32 },

    /// The caller cancelled the job
    #[error("generation cancelled")]
    Cancelled,

    /// The operation finished without a video
    #[error("operation {name} finished without a video")]
    MissingArtifact { name: String },

    /// The video could not be downloaded after a successful generation
    #[error("video retrieval failed: {0}")]
    Retrieval(String),
}

impl GenerationError {
    /// Classifies an error reported on the operation
    pub fn from_operation_error(error: &OperationError) -> Self {
        if is_safety_message(&error.message) {
            Self::PolicyViolation {
                code: Some(error.code),
                message: error.message.clone(),
            }
        } else {
            Self::Poll {
                code: error.code,
                message: error.message.clone(),
            }
        }
    }

    /// Classifies a finished operation that carries no video
    pub fn from_empty_operation(operation: &Operation) -> Self {
        if operation.is_content_filtered() {
            let reasons = operation.filtered_reasons();
            let message = if reasons.is_empty() {
                "output removed by the content filter".to_string()
            } else {
                reasons.join("; ")
            };
            Self::PolicyViolation {
                code: None,
                message,
            }
        } else {
            Self::MissingArtifact {
                name: operation.name.clone(),
            }
        }
    }

    /// Classifies a failed creation call
    pub fn from_submission(error: ClientError) -> Self {
        Self::classify_transport(error).unwrap_or_else(Self::Submission)
    }

    /// Classifies a failed status query
    pub fn from_poll_request(error: ClientError) -> Self {
        Self::classify_transport(error).unwrap_or_else(Self::PollRequest)
    }

    /// Classifies a failed download
    pub fn from_retrieval(error: ClientError) -> Self {
        Self::classify_transport(error).unwrap_or_else(|e| Self::Retrieval(e.to_string()))
    }

    /// Picks out the failures that mean the same thing at every step: a
    /// missing credential or a safety rejection. Anything else is handed back.
    fn classify_transport(error: ClientError) -> Result<Self, ClientError> {
        if error.is_configuration_error() {
            return Ok(Self::Configuration(error_message(&error)));
        }

        if let ClientError::ApiError { message, .. } = &error
            && is_safety_message(message)
        {
            return Ok(Self::PolicyViolation {
                code: None,
                message: message.clone(),
            });
        }

        Err(error)
    }

    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::PolicyViolation { .. })
    }

    /// Text suitable for showing to the person who asked for the video
    pub fn user_message(&self) -> String {
        match self {
            Self::PolicyViolation { .. } => {
                "The content triggered the safety policy. Please change the description.".to_string()
            }
            Self::Poll { code, .. } if *code == INTERNAL_ERROR_CODE => format!(
                "The provider hit an internal error (Error {}). Please try again later.",
                INTERNAL_ERROR_CODE
            ),
            Self::Timeout { .. } => {
                "Rendering did not finish in time because the server took too long.".to_string()
            }
            Self::Configuration(_) => {
                "The server is not configured. Please contact the administrator.".to_string()
            }
            Self::Cancelled => "Generation was cancelled.".to_string(),
            other => other.to_string(),
        }
    }
}

fn error_message(error: &ClientError) -> String {
    match error {
        ClientError::ApiError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn is_safety_message(message: &str) -> bool {
    message.to_ascii_uppercase().contains("SAFETY")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::domain::operation::OperationResponse;

    #[test]
    fn test_operation_error_keeps_code_and_message() {
        let err = GenerationError::from_operation_error(&OperationError {
            code: 13,
            message: "internal".to_string(),
        });
        assert!(matches!(err, GenerationError::Poll { code: 13, ref message } if message == "internal"));
        assert_eq!(err.to_string(), "API Error 13: internal");
        assert!(err.user_message().contains("Error 13"));
    }

    #[test]
    fn test_safety_message_is_policy_violation() {
        let err = GenerationError::from_operation_error(&OperationError {
            code: 3,
            message: "Prompt blocked by Safety filters".to_string(),
        });
        assert!(err.is_policy_violation());
        assert!(matches!(err, GenerationError::PolicyViolation { code: Some(3), .. }));
    }

    #[test]
    fn test_filtered_operation_is_policy_violation() {
        let op = Operation {
            name: "operations/abc".to_string(),
            done: true,
            error: None,
            response: Some(OperationResponse {
                rai_media_filtered_count: Some(1),
                rai_media_filtered_reasons: vec!["celebrity likeness".to_string()],
                ..Default::default()
            }),
        };
        let err = GenerationError::from_empty_operation(&op);
        assert!(matches!(
            err,
            GenerationError::PolicyViolation { code: None, ref message } if message == "celebrity likeness"
        ));
    }

    #[test]
    fn test_unfiltered_empty_operation_is_missing_artifact() {
        let mut op = Operation::pending("operations/abc");
        op.done = true;
        assert!(matches!(
            GenerationError::from_empty_operation(&op),
            GenerationError::MissingArtifact { .. }
        ));
    }

    #[test]
    fn test_configuration_error_from_submission() {
        let err = GenerationError::from_submission(ClientError::api_error(
            500,
            r#"{"error":"GEMINI_API_KEY is not set","code":"configuration_error"}"#,
        ));
        assert!(matches!(err, GenerationError::Configuration(ref m) if m == "GEMINI_API_KEY is not set"));
    }

    #[test]
    fn test_safety_rejection_at_creation_is_policy_violation() {
        let err = GenerationError::from_submission(ClientError::api_error(
            502,
            r#"{"error":"provider error (status 400): The prompt was blocked by SAFETY filters"}"#,
        ));
        assert!(err.is_policy_violation());
        assert_eq!(
            err.user_message(),
            "The content triggered the safety policy. Please change the description."
        );
    }

    #[test]
    fn test_safety_rejection_while_polling_is_policy_violation() {
        let err = GenerationError::from_poll_request(ClientError::api_error(
            400,
            r#"{"error":"request rejected for safety reasons"}"#,
        ));
        assert!(err.is_policy_violation());
    }

    #[test]
    fn test_configuration_error_from_retrieval() {
        let err = GenerationError::from_retrieval(ClientError::api_error(
            500,
            r#"{"error":"GEMINI_API_KEY is not set","code":"configuration_error"}"#,
        ));
        assert!(matches!(err, GenerationError::Configuration(ref m) if m == "GEMINI_API_KEY is not set"));
    }

    #[test]
    fn test_generic_download_failure_is_retrieval() {
        let err = GenerationError::from_retrieval(ClientError::api_error(502, "bad gateway"));
        assert!(matches!(err, GenerationError::Retrieval(ref m) if m.contains("bad gateway")));
    }

    #[test]
    fn test_generic_submission_failure() {
        let err = GenerationError::from_submission(ClientError::api_error(502, "bad gateway"));
        assert!(matches!(err, GenerationError::Submission(_)));
    }
}

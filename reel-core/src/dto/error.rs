//! Error body returned by the proxy

use serde::{Deserialize, Serialize};

/// Error code attached when the proxy has no provider credential
pub const CONFIGURATION_ERROR_CODE: &str = "configuration_error";

/// JSON error body returned by every proxy endpoint on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            code: None,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        self.code.as_deref() == Some(CONFIGURATION_ERROR_CODE)
    }
}

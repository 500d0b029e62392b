//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::provider::{ProviderClient, ProviderError};

/// State handed to every handler
///
/// Holds no per-job data; each request carries its own operation handle.
#[derive(Clone)]
pub struct AppState {
    pub provider: ProviderClient,
    api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(provider: ProviderClient, api_key: Option<String>) -> Self {
        Self {
            provider,
            api_key: api_key.map(Arc::from),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self::new(
            ProviderClient::new(config.provider_base_url.clone())?,
            config.api_key.clone(),
        ))
    }

    /// Provider credential, if configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

//! Proxy configuration
//!
//! Everything is read from the environment. A missing provider credential is
//! not a startup failure: the proxy still serves, and every API call answers
//! with a configuration error until the key is provided.

/// Environment variable holding the provider credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request bodies carry base64 frames, so the JSON limit is generous.
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Proxy configuration
#[derive(Clone)]
pub struct Config {
    /// Provider credential, never sent to callers
    pub api_key: Option<String>,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Base URL of the provider REST API
    pub provider_base_url: String,

    /// Maximum accepted request body size in bytes
    pub body_limit: usize,
}

impl Config {
    /// Creates a configuration with defaults and the given credential
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GEMINI_API_KEY (required for API calls, optional for startup)
    /// - REEL_BIND_ADDR (optional, default: 0.0.0.0:3000)
    /// - PORT (optional, overrides the port of the bind address)
    /// - GEMINI_API_BASE (optional, default: the public v1beta endpoint)
    /// - REEL_BODY_LIMIT (optional, bytes, default: 50 MiB)
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());

        let mut bind_addr =
            std::env::var("REEL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        if let Some(port) = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
        {
            bind_addr = with_port(&bind_addr, port);
        }

        let provider_base_url = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string());

        let body_limit = std::env::var("REEL_BODY_LIMIT")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_BODY_LIMIT);

        Self {
            api_key,
            bind_addr,
            provider_base_url,
            body_limit,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if !self.provider_base_url.starts_with("http://")
            && !self.provider_base_url.starts_with("https://")
        {
            anyhow::bail!("provider_base_url must start with http:// or https://");
        }

        if self.body_limit == 0 {
            anyhow::bail!("body_limit must be greater than 0");
        }

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("bind_addr", &self.bind_addr)
            .field("provider_base_url", &self.provider_base_url)
            .field("body_limit", &self.body_limit)
            .finish()
    }
}

fn with_port(addr: &str, port: u16) -> String {
    let host = addr.rsplit_once(':').map_or(addr, |(host, _)| host);
    format!("{}:{}", host, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.body_limit, 50 * 1024 * 1024);
        assert!(!config.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::new(Some("key".to_string()));
        assert!(config.validate().is_ok());

        config.provider_base_url = "generativelanguage.googleapis.com".to_string();
        assert!(config.validate().is_err());

        config.provider_base_url = DEFAULT_PROVIDER_BASE_URL.to_string();
        config.body_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new(Some("super-secret".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_with_port_replaces_port() {
        assert_eq!(with_port("0.0.0.0:3000", 8080), "0.0.0.0:8080");
        assert_eq!(with_port("localhost", 8080), "localhost:8080");
    }
}

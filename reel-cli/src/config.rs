//! Configuration module
//!
//! Handles CLI configuration including the proxy URL and poll policy.

use reel_client::PollPolicy;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Reel proxy
    pub proxy_url: String,

    /// How long to wait between status queries and how many to issue
    pub poll_policy: PollPolicy,
}

impl Config {
    pub fn new(proxy_url: String, poll_interval_secs: u64, max_polls: u32) -> Self {
        Self {
            proxy_url,
            poll_policy: PollPolicy::new(Duration::from_secs(poll_interval_secs), max_polls),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builds_poll_policy() {
        let config = Config::new("http://localhost:3000".to_string(), 2, 60);
        assert_eq!(config.poll_policy.interval, Duration::from_secs(2));
        assert_eq!(config.poll_policy.max_polls, 60);
        assert_eq!(config.poll_policy.budget(), Duration::from_secs(120));
    }

    #[test]
    fn test_huge_interval_does_not_overflow_budget() {
        let config = Config::new("http://localhost:3000".to_string(), u64::MAX, 60);
        assert_eq!(config.poll_policy.budget(), Duration::MAX);
    }
}

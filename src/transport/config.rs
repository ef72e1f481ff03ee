//! Configuration for the bundled gateway transport.

use serde::{Deserialize, Serialize};

/// Configuration for [`HttpTransport`](super::HttpTransport).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// API base URL (e.g., `https://bitpay.com/api`).
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl GatewayConfig {
    /// Create a new gateway configuration.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Create config for the production gateway.
    pub fn production() -> Self {
        Self::new("https://bitpay.com/api")
    }

    /// Create config for the sandbox gateway.
    pub fn sandbox() -> Self {
        Self::new("https://test.bitpay.com/api")
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let production = GatewayConfig::production();
        assert!(production.api_url.contains("bitpay.com"));
        assert!(!production.api_url.contains("test"));

        let sandbox = GatewayConfig::sandbox();
        assert!(sandbox.api_url.contains("test.bitpay.com"));
    }

    #[test]
    fn test_builder() {
        let config = GatewayConfig::new("https://gateway.example.com/api").with_timeout(60);
        assert_eq!(config.api_url, "https://gateway.example.com/api");
        assert_eq!(config.timeout_secs, 60);
    }
}

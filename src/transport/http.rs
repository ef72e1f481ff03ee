//! Reqwest-backed gateway transport.
//!
//! Authenticates with HTTP basic auth (the API key as the username), matching
//! how the gateway's legacy API expects merchant keys to be presented.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{GatewayConfig, Transport};
use crate::{BitPayError, Result};

/// HTTP transport for the gateway API.
///
/// # Example
///
/// ```rust,ignore
/// use bitpay_client::{GatewayConfig, HttpTransport};
///
/// let transport = HttpTransport::production()?;
/// // or, against the sandbox with a longer timeout:
/// let transport = HttpTransport::new(GatewayConfig::sandbox().with_timeout(60))?;
/// ```
pub struct HttpTransport {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BitPayError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a transport for the production gateway.
    pub fn production() -> Result<Self> {
        Self::new(GatewayConfig::production())
    }

    /// Create a transport for the sandbox gateway.
    pub fn sandbox() -> Result<Self> {
        Self::new(GatewayConfig::sandbox())
    }

    /// Get the configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the full URL for an API endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Handle an HTTP response, parsing JSON or returning an error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.map_status_error(status.as_u16(), &error_text));
        }

        response.json::<Value>().await.map_err(|e| {
            BitPayError::Serialization(format!("Failed to parse gateway response: {}", e))
        })
    }

    /// Map HTTP status codes to BitPayError.
    fn map_status_error(&self, status: u16, error_text: &str) -> BitPayError {
        match status {
            400 => BitPayError::InvalidData {
                field: "request".to_string(),
                reason: error_text.to_string(),
            },
            404 => BitPayError::NotFound {
                resource_type: "gateway resource".to_string(),
                identifier: error_text.to_string(),
            },
            500..=599 => BitPayError::Internal(format!(
                "gateway server error ({}): {}",
                status, error_text
            )),
            _ => BitPayError::Transport(format!(
                "gateway request failed ({}): {}",
                status, error_text
            )),
        }
    }

    /// Map reqwest errors to BitPayError.
    fn map_reqwest_error(&self, operation: &str, e: reqwest::Error) -> BitPayError {
        if e.is_timeout() {
            BitPayError::ConnectionTimeout {
                operation: operation.to_string(),
                timeout_ms: self.config.timeout_secs * 1000,
            }
        } else if e.is_connect() {
            BitPayError::ConnectionFailed {
                target: self.config.api_url.clone(),
                reason: e.to_string(),
            }
        } else {
            BitPayError::Transport(format!("gateway request failed: {}", e))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, api_key: &str) -> Result<Value> {
        let url = self.url(path);

        let response = self
            .client
            .get(&url)
            .basic_auth(api_key, None::<&str>)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error("gateway GET", e))?;

        self.handle_response(response).await
    }

    async fn post(&self, path: &str, body: &str, api_key: &str) -> Result<Value> {
        let url = self.url(path);

        let response = self
            .client
            .post(&url)
            .basic_auth(api_key, None::<&str>)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| self.map_reqwest_error("gateway POST", e))?;

        self.handle_response(response).await
    }
}

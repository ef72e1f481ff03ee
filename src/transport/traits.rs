use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Trait describing HTTP access to the gateway API.
///
/// Paths are relative to the gateway API root (e.g. `invoice/abc123`).
/// Implementations own TLS, timeouts, and any retry policy; the client
/// never retries on its own.
#[async_trait]
pub trait Transport {
    /// Issue a GET request, authenticated with `api_key`, and decode the
    /// response body as JSON.
    async fn get(&self, path: &str, api_key: &str) -> Result<Value>;

    /// POST a JSON-encoded `body`, authenticated with `api_key`, and decode
    /// the response body as JSON.
    async fn post(&self, path: &str, body: &str, api_key: &str) -> Result<Value>;
}

//! BitPay payment gateway client library.
//!
//! This crate intentionally stays stateless and delegates HTTP access and
//! keyed hashing to callers through trait-based dependency injection.
//!
//! # Features
//!
//! - **Invoices**: create an invoice and fetch it back by identifier
//! - **Notification verification**: authenticate inbound notifications by
//!   recomputing the keyed hash over the echoed merchant metadata
//! - **Transport abstraction**: trait-based design for custom transport
//!   implementations, with a bundled reqwest client
//!
//! # Example
//!
//! ```ignore
//! use bitpay_client::{ApiOptions, BitPayClient, HmacSha256Encrypter, HttpTransport};
//! use serde_json::json;
//!
//! let client = BitPayClient::new(
//!     HttpTransport::production()?,
//!     HmacSha256Encrypter::new(b"merchant secret"),
//!     "my-api-key",
//! );
//!
//! // Create an invoice with metadata the gateway will echo back.
//! let invoice = client
//!     .create_invoice(1001, 42.0, json!({"sku": "ABC"}), &ApiOptions::empty())
//!     .await?;
//!
//! // Later, in the notification handler:
//! // let notification = client.verify_notification(&raw_post_body)?;
//! // let trusted = notification.pos_data();
//! ```

mod client;
pub mod errors;
pub mod integrity;
pub mod models;
pub mod options;
mod transport;

/// Mock collaborators for testing.
///
/// This module is only available with the `test-utils` feature or in test
/// builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::BitPayClient;
pub use errors::BitPayError;
pub use integrity::{Encrypter, HmacSha256Encrypter};
pub use models::{Invoice, Notification};
pub use options::ApiOptions;
pub use transport::{GatewayConfig, Transport};

/// The bundled HTTP transport is only exposed when the default
/// `http-transport` feature is enabled.
#[cfg(feature = "http-transport")]
pub use transport::HttpTransport;

/// Common result alias for gateway client operations.
pub type Result<T> = std::result::Result<T, BitPayError>;

/// Merchant API key presented to the gateway on every request.
///
/// Deliberately has no `Display` impl so the key does not end up in logs.
///
/// # Example
///
/// ```
/// use bitpay_client::ApiKey;
///
/// // Create from &str
/// let key: ApiKey = "my-api-key".into();
///
/// // Or explicitly
/// let key = ApiKey::new("my-api-key");
///
/// // Access the inner value
/// assert_eq!(key.as_str(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiKey(pub String);

impl ApiKey {
    /// Create a new ApiKey from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! API option handling for invoice creation.
//!
//! The gateway accepts a flat set of invoice fields. Options merge
//! last-write-wins: per-call overrides sit on top of the client's defaults,
//! and only the allow-listed [`POST_FIELDS`] are ever forwarded to the
//! gateway. Everything else (notably `verifyPos`) stays client-side.

use serde_json::{Map, Value};

/// Invoice fields forwarded to the gateway on invoice creation.
///
/// Any merged option outside this list is kept for client-side use but
/// never posted.
pub const POST_FIELDS: [&str; 20] = [
    "orderID",
    "itemDesc",
    "itemCode",
    "notificationEmail",
    "notificationURL",
    "redirectURL",
    "posData",
    "price",
    "currency",
    "physical",
    "fullNotifications",
    "transactionSpeed",
    "buyerName",
    "buyerAddress1",
    "buyerAddress2",
    "buyerCity",
    "buyerState",
    "buyerZip",
    "buyerEmail",
    "buyerPhone",
];

/// Ordered bag of invoice options keyed by the gateway's field names.
///
/// `Default` carries the gateway defaults; [`ApiOptions::empty`] starts
/// blank and is the natural shape for per-call overrides.
///
/// # Example
///
/// ```
/// use bitpay_client::ApiOptions;
///
/// let opts = ApiOptions::empty()
///     .with("currency", "USD")
///     .with("itemDesc", "One widget");
/// assert_eq!(opts.get("currency").and_then(|v| v.as_str()), Some("USD"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiOptions {
    entries: Map<String, Value>,
}

impl ApiOptions {
    /// Create an empty option set with no defaults applied.
    pub fn empty() -> Self {
        Self {
            entries: Map::new(),
        }
    }

    /// Create the gateway default option set.
    pub fn gateway_defaults() -> Self {
        let mut entries = Map::new();
        entries.insert("verifyPos".to_string(), Value::Bool(true));
        entries.insert("notificationEmail".to_string(), Value::String(String::new()));
        entries.insert("notificationURL".to_string(), Value::String(String::new()));
        entries.insert("redirectURL".to_string(), Value::String(String::new()));
        entries.insert("currency".to_string(), Value::String("BTC".to_string()));
        entries.insert("physical".to_string(), Value::String("true".to_string()));
        entries.insert(
            "fullNotifications".to_string(),
            Value::String("true".to_string()),
        );
        entries.insert(
            "transactionSpeed".to_string(),
            Value::String("low".to_string()),
        );
        Self { entries }
    }

    /// Set an option, consuming and returning self for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an option in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Merge `overrides` on top of this set, last write wins per key.
    pub fn merged(&self, overrides: &ApiOptions) -> ApiOptions {
        let mut entries = self.entries.clone();
        for (key, value) in &overrides.entries {
            entries.insert(key.clone(), value.clone());
        }
        ApiOptions { entries }
    }

    /// Whether posData integrity verification is enabled.
    ///
    /// Absent or non-boolean `verifyPos` entries count as enabled; disabling
    /// verification must be an explicit choice.
    pub fn verify_pos(&self) -> bool {
        self.entries
            .get("verifyPos")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Project the allow-listed [`POST_FIELDS`] into an outbound payload map.
    pub fn post_fields(&self) -> Map<String, Value> {
        let mut post = Map::new();
        for field in POST_FIELDS {
            if let Some(value) = self.entries.get(field) {
                post.insert(field.to_string(), value.clone());
            }
        }
        post
    }
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self::gateway_defaults()
    }
}

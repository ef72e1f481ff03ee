//! Gateway client tying the transport, encrypter, and options together.

use serde_json::{Map, Value};

use crate::integrity::{self, Encrypter};
use crate::models::{Invoice, Notification};
use crate::options::ApiOptions;
use crate::transport::Transport;
use crate::{ApiKey, BitPayError, Result};

/// Client for the gateway HTTP API.
///
/// The transport and encrypter are supplied at construction so tests (and
/// merchants with their own HTTP stack or hashing scheme) can substitute
/// either. The client itself holds no mutable state after construction:
/// every call is independent and idempotent with respect to the client.
///
/// # Example
///
/// ```rust,ignore
/// use bitpay_client::{ApiOptions, BitPayClient, HmacSha256Encrypter, HttpTransport};
/// use serde_json::json;
///
/// let client = BitPayClient::new(
///     HttpTransport::production()?,
///     HmacSha256Encrypter::new(b"merchant secret"),
///     "my-api-key",
/// );
///
/// let invoice = client
///     .create_invoice(1001, 42.0, json!({"sku": "ABC"}), &ApiOptions::empty())
///     .await?;
/// println!("pay at {}", invoice.url.unwrap_or_default());
/// ```
pub struct BitPayClient<T, E> {
    transport: T,
    encrypter: E,
    api_key: ApiKey,
    options: ApiOptions,
}

impl<T: Transport, E: Encrypter> BitPayClient<T, E> {
    /// Construct a client with the gateway default options.
    pub fn new(transport: T, encrypter: E, api_key: impl Into<ApiKey>) -> Self {
        Self {
            transport,
            encrypter,
            api_key: api_key.into(),
            options: ApiOptions::gateway_defaults(),
        }
    }

    /// Merge `options` over the client defaults. Chainable.
    pub fn with_options(mut self, options: &ApiOptions) -> Self {
        self.options = self.options.merged(options);
        self
    }

    /// Set a single default option.
    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.options.insert(name, value);
    }

    /// The client's current default options.
    pub fn options(&self) -> &ApiOptions {
        &self.options
    }

    /// Fetch an invoice by its gateway identifier.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn get_invoice(&self, id: &str) -> Result<Invoice> {
        let response = self
            .transport
            .get(&format!("invoice/{}", id), self.api_key.as_str())
            .await
            .map_err(|err| map_transport_error("get_invoice", err))?;

        Ok(serde_json::from_value(response)?)
    }

    /// Create an invoice for `price` in the configured currency.
    ///
    /// `order_id` is the merchant's own identifier for the purchase;
    /// `pos_data` is arbitrary merchant metadata the gateway echoes back in
    /// notifications. When `verifyPos` is enabled (the default) the metadata
    /// is tagged with a keyed hash so [`verify_notification`] can
    /// authenticate the echo. `overrides` merge over the client defaults,
    /// last write wins, but `orderID` and `price` always come from the
    /// explicit arguments.
    ///
    /// Only the allow-listed invoice fields are forwarded to the gateway;
    /// see [`crate::options::POST_FIELDS`].
    ///
    /// [`verify_notification`]: Self::verify_notification
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, pos_data, overrides)))]
    pub async fn create_invoice(
        &self,
        order_id: impl Into<Value> + std::fmt::Debug,
        price: f64,
        pos_data: Value,
        overrides: &ApiOptions,
    ) -> Result<Invoice> {
        let mut options = self.options.merged(overrides);

        let envelope = self.build_envelope(&pos_data, options.verify_pos())?;
        options.insert("posData", envelope);

        // Explicit arguments override anything the merge produced.
        options.insert("orderID", order_id.into());
        options.insert("price", price);

        let body = serde_json::to_string(&Value::Object(options.post_fields()))?;

        let response = self
            .transport
            .post("invoice/", &body, self.api_key.as_str())
            .await
            .map_err(|err| map_transport_error("create_invoice", err))?;

        Ok(serde_json::from_value(response)?)
    }

    /// Verify an inbound payment notification.
    ///
    /// Call this from your notification handler with the raw POST body. On
    /// success the returned [`Notification`] carries the full decoded payload
    /// with `posData` replaced by the bare, authenticated metadata.
    ///
    /// With `verifyPos` disabled the metadata is trusted unconditionally and
    /// the encrypter is never consulted.
    ///
    /// # Errors
    ///
    /// - [`BitPayError::MalformedPayload`] - body is not valid JSON, decodes
    ///   to a non-object, or the `posData` envelope is not a JSON-encoded
    ///   object string.
    /// - [`BitPayError::MissingOrderData`] - no `posData` field, outer or
    ///   inner.
    /// - [`BitPayError::AuthenticationFailed`] - the hash is absent or does
    ///   not match the recomputed tag. Treat this as a hard rejection.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, raw), fields(raw_len = raw.len()))
    )]
    pub fn verify_notification(&self, raw: &str) -> Result<Notification> {
        let decoded: Value = serde_json::from_str(raw).map_err(|e| {
            BitPayError::malformed(format!("notification is not valid JSON: {}", e))
        })?;

        let mut fields = match decoded {
            Value::Object(fields) => fields,
            _ => {
                return Err(BitPayError::malformed(
                    "notification did not decode to a JSON object",
                ))
            }
        };

        let envelope_json = match fields.get("posData") {
            None => return Err(BitPayError::MissingOrderData),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(BitPayError::malformed(
                    "posData field is not a JSON-encoded string",
                ))
            }
        };

        let envelope: Value = serde_json::from_str(&envelope_json).map_err(|e| {
            BitPayError::malformed(format!("posData envelope is not valid JSON: {}", e))
        })?;
        let envelope = match envelope {
            Value::Object(envelope) => envelope,
            _ => return Err(BitPayError::malformed("posData envelope is not a JSON object")),
        };

        let metadata = match envelope.get("posData") {
            Some(metadata) => metadata.clone(),
            None => return Err(BitPayError::MissingOrderData),
        };

        if self.options.verify_pos() {
            let candidate = envelope
                .get("hash")
                .and_then(Value::as_str)
                .ok_or(BitPayError::AuthenticationFailed)?;
            if !integrity::verify_tag(&self.encrypter, &metadata, candidate)? {
                return Err(BitPayError::AuthenticationFailed);
            }
        }

        fields.insert("posData".to_string(), metadata);
        Ok(Notification::new(fields))
    }

    /// Build the JSON-encoded posData envelope for the outbound payload.
    ///
    /// The `hash` field is present only when verification is enabled; the
    /// wire shape is otherwise identical either way.
    fn build_envelope(&self, pos_data: &Value, verify: bool) -> Result<String> {
        let mut envelope = Map::new();
        envelope.insert("posData".to_string(), pos_data.clone());
        if verify {
            let tag = integrity::produce_tag(&self.encrypter, pos_data)?;
            envelope.insert("hash".to_string(), Value::String(tag));
        }
        Ok(serde_json::to_string(&Value::Object(envelope))?)
    }
}

fn map_transport_error(label: &'static str, err: BitPayError) -> BitPayError {
    match err {
        BitPayError::Transport(msg) => BitPayError::Transport(format!("{label}: {msg}")),
        _ => err,
    }
}

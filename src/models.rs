//! Gateway resource types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Invoice resource as returned by the gateway.
///
/// The gateway's responses have drifted over the years, so every field is
/// optional and unknown fields are kept in `extra` rather than dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invoice {
    /// Gateway-assigned invoice identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Payment page URL for the buyer.
    #[serde(default)]
    pub url: Option<String>,

    /// Invoice status (`new`, `paid`, `confirmed`, `complete`, `expired`, `invalid`).
    #[serde(default)]
    pub status: Option<String>,

    /// Price in the invoice currency.
    #[serde(default)]
    pub price: Option<f64>,

    /// Invoice currency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// Price converted to BTC.
    #[serde(default, rename = "btcPrice")]
    pub btc_price: Option<String>,

    /// Invoice creation time (unix millis).
    #[serde(default, rename = "invoiceTime")]
    pub invoice_time: Option<i64>,

    /// Invoice expiration time (unix millis).
    #[serde(default, rename = "expirationTime")]
    pub expiration_time: Option<i64>,

    /// Gateway clock at response time (unix millis).
    #[serde(default, rename = "currentTime")]
    pub current_time: Option<i64>,

    /// Merchant posData as carried by this resource. A JSON-encoded envelope
    /// string on raw invoice responses; bare metadata on verified
    /// notifications.
    #[serde(default, rename = "posData")]
    pub pos_data: Option<Value>,

    /// Any response fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invoice {
    /// Whether the gateway considers this invoice settled.
    ///
    /// `confirmed` means settled per the merchant's transaction-speed
    /// setting; `complete` means fully confirmed on-chain.
    pub fn is_confirmed(&self) -> bool {
        matches!(self.status.as_deref(), Some("confirmed") | Some("complete"))
    }
}

/// A notification that passed verification.
///
/// Holds the full decoded notification with the `posData` field already
/// replaced by the bare, authenticated metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    fields: Map<String, Value>,
}

impl Notification {
    pub(crate) fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The authenticated merchant metadata.
    pub fn pos_data(&self) -> Option<&Value> {
        self.fields.get("posData")
    }

    /// Invoice identifier, when the gateway included one.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Invoice status, when the gateway included one.
    pub fn status(&self) -> Option<&str> {
        self.fields.get("status").and_then(Value::as_str)
    }

    /// Look up any notification field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All notification fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the notification, returning its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// View the notification as a typed [`Invoice`].
    pub fn to_invoice(&self) -> Result<Invoice> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoice_lenient_decode() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": "inv-1",
            "url": "https://bitpay.com/invoice?id=inv-1",
            "status": "new",
            "price": 10.0,
            "currency": "USD",
            "invoiceTime": 1_700_000_000_000i64,
            "someFutureField": {"nested": true}
        }))
        .unwrap();

        assert_eq!(invoice.id.as_deref(), Some("inv-1"));
        assert_eq!(invoice.price, Some(10.0));
        assert!(invoice.expiration_time.is_none());
        assert_eq!(
            invoice.extra.get("someFutureField"),
            Some(&json!({"nested": true}))
        );
    }

    #[test]
    fn test_invoice_confirmation_statuses() {
        let mut invoice: Invoice = serde_json::from_value(json!({"status": "new"})).unwrap();
        assert!(!invoice.is_confirmed());

        invoice.status = Some("confirmed".to_string());
        assert!(invoice.is_confirmed());

        invoice.status = Some("complete".to_string());
        assert!(invoice.is_confirmed());
    }

    #[test]
    fn test_notification_accessors() {
        let mut fields = Map::new();
        fields.insert("id".to_string(), json!("inv-2"));
        fields.insert("status".to_string(), json!("paid"));
        fields.insert("posData".to_string(), json!({"sku": "ABC"}));
        let notification = Notification::new(fields);

        assert_eq!(notification.id(), Some("inv-2"));
        assert_eq!(notification.status(), Some("paid"));
        assert_eq!(notification.pos_data(), Some(&json!({"sku": "ABC"})));

        let invoice = notification.to_invoice().unwrap();
        assert_eq!(invoice.status.as_deref(), Some("paid"));
        assert_eq!(invoice.pos_data, Some(json!({"sku": "ABC"})));
    }
}

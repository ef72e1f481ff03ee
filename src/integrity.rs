//! posData integrity: serialization, tag production, and tag verification.
//!
//! The gateway is an untrusted relay for merchant order metadata: whatever a
//! merchant attaches to an invoice is echoed back verbatim in notifications.
//! The integrity tag binds that echoed metadata to the value the merchant
//! originally sent, under a key only the merchant holds. Anyone able to write
//! to the notification channel can forge metadata; nobody without the key can
//! forge a matching tag.
//!
//! Tag comparison is constant-time so the verification step does not leak
//! tag prefixes through response timing.

use std::fmt::Write;

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use crate::Result;

type HmacSha256 = Hmac<Sha256>;

/// Keyed, deterministic hashing collaborator for posData tags.
///
/// Implementations must return the same output for the same input over the
/// lifetime of the instance; the client calls this both when building an
/// invoice and when verifying the notification that echoes it back.
pub trait Encrypter {
    /// Hash the serialized posData, returning the tag to embed on the wire.
    fn encrypt(&self, payload: &str) -> String;
}

/// Default [`Encrypter`]: HMAC-SHA256 over the serialized posData,
/// hex-encoded lowercase.
///
/// # Example
///
/// ```
/// use bitpay_client::{Encrypter, HmacSha256Encrypter};
///
/// let encrypter = HmacSha256Encrypter::new(b"merchant secret");
/// let tag = encrypter.encrypt("{\"sku\":\"ABC\"}");
/// assert_eq!(tag.len(), 64);
/// ```
#[derive(Clone)]
pub struct HmacSha256Encrypter {
    key: Vec<u8>,
}

impl HmacSha256Encrypter {
    /// Create an encrypter from a merchant-held secret key.
    ///
    /// The key should come from a cryptographically secure random source and
    /// never be shared with the gateway.
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
        }
    }
}

impl Encrypter for HmacSha256Encrypter {
    fn encrypt(&self, payload: &str) -> String {
        // HMAC accepts keys of any length.
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        let bytes = mac.finalize().into_bytes();

        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            // Writing to a String cannot fail.
            let _ = write!(&mut hex, "{:02x}", byte);
        }
        hex
    }
}

/// Serialize order metadata into the byte form that gets hashed.
///
/// Deterministic for a fixed value: object keys keep their insertion order,
/// so the metadata decoded back out of a notification serializes to the
/// exact bytes the merchant originally hashed. Two metadata values are "the
/// same" iff their serialized forms are byte-identical.
pub fn serialize_pos_data(metadata: &Value) -> Result<String> {
    Ok(serde_json::to_string(metadata)?)
}

/// Produce the integrity tag for `metadata` using the injected encrypter.
///
/// Pure: never mutates the metadata, never touches the network.
pub fn produce_tag<E: Encrypter>(encrypter: &E, metadata: &Value) -> Result<String> {
    let serialized = serialize_pos_data(metadata)?;
    Ok(encrypter.encrypt(&serialized))
}

/// Recompute the tag for `metadata` and compare against `candidate`.
///
/// Returns `Ok(true)` iff they match. Comparison is constant-time.
pub fn verify_tag<E: Encrypter>(encrypter: &E, metadata: &Value, candidate: &str) -> Result<bool> {
    let expected = produce_tag(encrypter, metadata)?;
    Ok(constant_time_eq(expected.as_bytes(), candidate.as_bytes()))
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

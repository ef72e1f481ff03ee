//! Mock collaborators for testing.
//!
//! This module is only available with the `test-utils` feature or in test
//! builds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::integrity::Encrypter;
use crate::transport::Transport;
use crate::Result;

/// A request captured by [`MockTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// HTTP method, `"GET"` or `"POST"`.
    pub method: &'static str,
    /// Request path relative to the API root.
    pub path: String,
    /// JSON body for POST requests.
    pub body: Option<String>,
    /// API key the client authenticated with.
    pub api_key: String,
}

/// Transport double that records every request and answers with a canned
/// response.
///
/// Clones share the request log, so keep a clone outside the client to
/// inspect what was sent.
#[derive(Clone)]
pub struct MockTransport {
    response: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Create a transport that answers every request with `response`.
    pub fn returning(response: Value) -> Self {
        Self {
            response,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All requests issued so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, api_key: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            body: None,
            api_key: api_key.to_string(),
        });
        Ok(self.response.clone())
    }

    async fn post(&self, path: &str, body: &str, api_key: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            body: Some(body.to_string()),
            api_key: api_key.to_string(),
        });
        Ok(self.response.clone())
    }
}

/// Encrypter double returning its input unchanged and counting invocations.
///
/// The identity mapping makes expected wire payloads trivial to write out in
/// tests; the counter proves gate-bypass behavior (the client must not touch
/// the encrypter when `verifyPos` is disabled).
#[derive(Clone, Default)]
pub struct IdentityEncrypter {
    calls: Arc<AtomicUsize>,
}

impl IdentityEncrypter {
    /// Create a fresh encrypter with a zeroed call counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `encrypt` has been called, across all clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Encrypter for IdentityEncrypter {
    fn encrypt(&self, payload: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        payload.to_string()
    }
}

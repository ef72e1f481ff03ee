//! Integration tests for the bundled HTTP transport.
//!
//! These tests verify the reqwest transport against a mock HTTP server.
//!
//! ```bash
//! cargo test --features http-transport --test transport_integration
//! ```

#![cfg(feature = "http-transport")]

use bitpay_client::{BitPayError, GatewayConfig, HttpTransport, Transport};
use serde_json::json;
use wiremock::{
    matchers::{body_string_contains, header, header_exists, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(GatewayConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn get_decodes_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoice/inv-1"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "inv-1",
            "status": "new"
        })))
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let value = transport.get("invoice/inv-1", "api-key").await.unwrap();

    assert_eq!(value["id"], json!("inv-1"));
    assert_eq!(value["status"], json!("new"));
}

#[tokio::test]
async fn post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/invoice/"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains("\"orderID\":42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "inv-2",
            "status": "new"
        })))
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let value = transport
        .post("invoice/", "{\"orderID\":42,\"price\":1.5}", "api-key")
        .await
        .unwrap();

    assert_eq!(value["id"], json!("inv-2"));
}

#[tokio::test]
async fn missing_invoice_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoice/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such invoice"))
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let err = transport.get("invoice/nope", "api-key").await.unwrap_err();

    assert!(matches!(err, BitPayError::NotFound { .. }));
}

#[tokio::test]
async fn server_error_maps_to_internal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/invoice/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let err = transport.post("invoice/", "{}", "api-key").await.unwrap_err();

    assert!(matches!(err, BitPayError::Internal(_)));
}

#[tokio::test]
async fn non_json_success_body_maps_to_serialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoice/weird"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let err = transport.get("invoice/weird", "api-key").await.unwrap_err();

    assert!(matches!(err, BitPayError::Serialization(_)));
}

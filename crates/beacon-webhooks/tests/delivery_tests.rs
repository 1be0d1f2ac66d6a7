//! Integration tests for signed webhook delivery.
//!
//! Verifies that one dispatch tick delivers a correctly signed ping envelope
//! to a registered subscriber, and that per-delivery headers behave as
//! documented.

mod common;

use common::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

/// Test: one tick delivers exactly one POST with a valid signature over the
/// exact received body.
#[tokio::test]
async fn test_tick_delivers_signed_ping() {
    let mock_server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&mock_server)
        .await;

    let (registry, _state, dispatcher) = test_stack();
    let url = format!("{}/hook", mock_server.uri());
    let secret = registry.register(&url).await.unwrap();

    dispatcher.dispatch_tick().await;

    assert_eq!(capture.request_count(), 1);
    let captured = &capture.requests()[0];

    // Body is the documented envelope
    let body = captured.body_json();
    assert_eq!(body["type"], "ping");
    assert_eq!(body["data"]["text"], "Hello webhook!");

    // Signature verifies against the raw received bytes with the returned secret
    assert!(verify_captured_signature(captured, &secret));

    assert_eq!(
        captured.header("content-type"),
        Some("application/json")
    );
}

/// Test: the `webhook-timestamp` header matches the body timestamp and uses
/// ISO-8601 with microsecond precision and a `Z` suffix.
#[tokio::test]
async fn test_timestamp_header_matches_body() {
    let mock_server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&mock_server)
        .await;

    let (registry, _state, dispatcher) = test_stack();
    registry
        .register(&format!("{}/hook", mock_server.uri()))
        .await
        .unwrap();

    dispatcher.dispatch_tick().await;

    let captured = &capture.requests()[0];
    let header_ts = captured.header("webhook-timestamp").unwrap();
    let body = captured.body_json();

    assert_eq!(body["timestamp"].as_str().unwrap(), header_ts);
    assert!(header_ts.ends_with('Z'));
    // 2026-08-06T09:15:42.123456Z
    assert_eq!(header_ts.len(), 27);
    assert_eq!(&header_ts[19..20], ".");
}

/// Test: `webhook-id` is 64 hex chars and differs across consecutive
/// deliveries to the same subscriber.
#[tokio::test]
async fn test_webhook_id_unique_per_delivery() {
    let mock_server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&mock_server)
        .await;

    let (registry, _state, dispatcher) = test_stack();
    registry
        .register(&format!("{}/hook", mock_server.uri()))
        .await
        .unwrap();

    dispatcher.dispatch_tick().await;
    dispatcher.dispatch_tick().await;

    let requests = capture.requests();
    assert_eq!(requests.len(), 2);

    let id1 = requests[0].header("webhook-id").unwrap();
    let id2 = requests[1].header("webhook-id").unwrap();

    assert_eq!(id1.len(), 64);
    assert!(id1.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(id1, id2);
}

/// Test: after re-registration, deliveries are signed with the latest secret
/// only (overwrite semantics).
#[tokio::test]
async fn test_delivery_signed_with_latest_secret() {
    let mock_server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&mock_server)
        .await;

    let (registry, _state, dispatcher) = test_stack();
    let url = format!("{}/hook", mock_server.uri());

    let old_secret = registry.register(&url).await.unwrap();
    let new_secret = registry.register(&url).await.unwrap();

    dispatcher.dispatch_tick().await;

    let captured = &capture.requests()[0];
    assert!(verify_captured_signature(captured, &new_secret));
    assert!(!verify_captured_signature(captured, &old_secret));
}

/// Test: a tick with no subscribers sends nothing and does not panic.
#[tokio::test]
async fn test_empty_registry_tick_is_a_noop() {
    let (_registry, _state, dispatcher) = test_stack();
    dispatcher.dispatch_tick().await;
}

/// Test: a custom event type and payload flow through to the envelope.
#[tokio::test]
async fn test_custom_event_configuration() {
    let mock_server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&mock_server)
        .await;

    let (registry, _state, dispatcher) = test_stack();
    let dispatcher = dispatcher
        .with_event_type("heartbeat")
        .with_event_data(serde_json::json!({"sequence": 7}));

    registry
        .register(&format!("{}/hook", mock_server.uri()))
        .await
        .unwrap();

    dispatcher.dispatch_tick().await;

    let body = capture.requests()[0].body_json();
    assert_eq!(body["type"], "heartbeat");
    assert_eq!(body["data"]["sequence"], 7);
}

/// Integration tests for the JSON-RPC traffic generator
///
/// These tests run the client against a mock management endpoint and check
/// the request envelopes it sends and how it maps replies and failures.
///
/// Test coverage:
/// - Start / Stop / ReadCounters request parameters
/// - Counter decoding and ratio computation
/// - RPC error objects, HTTP errors and malformed replies
use mockito::{Matcher, Server};
use msibench::adapters::traffic_gen::{JsonRpcConfig, JsonRpcTrafficGen};
use msibench::{DomainError, TrafficGen};
use serde_json::json;
use std::time::Duration;

fn client_for(server: &Server, index: usize) -> JsonRpcTrafficGen {
    let config = JsonRpcConfig {
        endpoint: server.url(),
        client_index: index,
        timeout_secs: 2,
        clear_counters: true,
    };
    JsonRpcTrafficGen::new(config).expect("Failed to create client")
}

fn ok_reply(result: serde_json::Value) -> String {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string()
}

#[tokio::test]
async fn test_start_sends_interval_and_index() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": "PingClient.Start",
            "params": { "Index": 2, "Interval": 1500, "ClearCounters": true }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_reply(json!(true)))
        .create_async()
        .await;

    let mut gen = client_for(&server, 2);
    gen.start(1500).await.expect("start should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_stop_sends_linger_as_rx_delay() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "PingClient.Stop",
            "params": { "Index": 0, "RxDelay": 500_000_000u64 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        // null result is a valid reply for a void method
        .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": null }).to_string())
        .create_async()
        .await;

    let mut gen = client_for(&server, 0);
    gen.stop(Duration::from_millis(500))
        .await
        .expect("stop should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_read_counters_decodes_ping_counters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "PingClient.ReadCounters",
            "params": { "Index": 0 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_reply(json!({
            "NInterests": 1000,
            "NData": 990,
            "NNacks": 4
        })))
        .create_async()
        .await;

    let mut gen = client_for(&server, 0);
    let cnt = gen.read_counters().await.expect("read should succeed");

    assert_eq!(cnt.n_requests, 1000);
    assert_eq!(cnt.n_satisfied, 990);
    assert_eq!(cnt.n_nacks, 4);
    assert!((cnt.satisfy_ratio - 0.99).abs() < 1e-9);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rpc_error_maps_to_generator_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32000, "message": "client index out of range" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut gen = client_for(&server, 9);
    let err = gen.start(1000).await.unwrap_err();

    match err {
        DomainError::Generator { operation, message } => {
            assert_eq!(operation, "start");
            assert!(message.contains("client index out of range"));
        }
        other => panic!("Expected generator error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_maps_to_generator_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let mut gen = client_for(&server, 0);
    let err = gen.read_counters().await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Generator {
            operation: "read_counters",
            ..
        }
    ));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_counters_missing_fields_are_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_reply(json!({ "NData": 5 })))
        .create_async()
        .await;

    let mut gen = client_for(&server, 0);
    let err = gen.read_counters().await.unwrap_err();

    assert!(matches!(err, DomainError::MalformedCounters(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_fails() {
    let config = JsonRpcConfig {
        endpoint: "http://127.0.0.1:1".to_string(),
        timeout_secs: 1,
        ..Default::default()
    };
    let mut gen = JsonRpcTrafficGen::new(config).unwrap();

    let err = gen.start(1000).await.unwrap_err();
    assert!(matches!(err, DomainError::Generator { operation: "start", .. }));
}

//! Tool-call webhook dispatch tests.
//!
//! Drives the router with `tower::ServiceExt::oneshot` and stands in for
//! the content store with a wiremock server. Covers the ignored path,
//! malformed bodies, per-call skipping and error shaping, and the fail-soft
//! lookup behavior.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use voxtrack_api::{create_router, AppState};
use voxtrack_lookup::{LookupClient, StoreConfig};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn test_state(store_base: &str) -> AppState {
    let config = StoreConfig {
        project_id: "testproj".to_string(),
        dataset: "production".to_string(),
        api_token: "test-token".to_string(),
        api_base: Some(store_base.to_string()),
        timeout: Duration::from_secs(2),
        ..StoreConfig::default()
    };

    AppState { lookup: LookupClient::new(config).expect("client builds") }
}

/// State whose store endpoint refuses connections; for tests that must not
/// or cannot reach the store.
fn offline_state() -> AppState {
    test_state("http://127.0.0.1:9")
}

async fn post_webhook(state: AppState, body: Body) -> (StatusCode, Value) {
    let app = create_router(state);
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.expect("request completes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("response is JSON");
    (status, value)
}

fn tool_calls_payload(calls: Value) -> Body {
    Body::from(json!({ "message": { "type": "tool-calls", "toolCalls": calls } }).to_string())
}

fn tracker_call(id: &str, arguments: Value) -> Value {
    json!({
        "id": id,
        "type": "function",
        "function": { "name": "delivery_tracker", "arguments": arguments }
    })
}

async fn mount_store_result(server: &MockServer, result: Value) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v2021-10-21/data/query/production"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": result })))
        .mount(server)
        .await;
}

fn store_record() -> Value {
    json!({
        "tracking_id": "AB123CD",
        "status": "in transit",
        "customerName": "Priya Shah",
        "customerPhone": "+1 555 0100",
        "estimatedDelivery": "tomorrow evening",
        "issueMessage": null
    })
}

#[tokio::test]
async fn non_tool_call_messages_are_ignored() {
    let payload = json!({ "message": { "type": "status-update" } });
    let (status, body) = post_webhook(offline_state(), Body::from(payload.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert!(body["reason"].is_string());
}

#[tokio::test]
async fn payload_without_message_is_ignored() {
    let (status, body) = post_webhook(offline_state(), Body::from("{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
}

#[tokio::test]
async fn malformed_body_returns_500_with_detail() {
    let (status, body) = post_webhook(offline_state(), Body::from("this is not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.starts_with("Internal Server Error: "));
}

#[tokio::test]
async fn calls_for_other_functions_produce_no_output() {
    let payload = tool_calls_payload(json!([{
        "id": "call_1",
        "type": "function",
        "function": { "name": "weather_report", "arguments": {"city": "Oslo"} }
    }]));
    let (status, body) = post_webhook(offline_state(), payload).await;

    // No outputs produced, so the batch falls back to the ignored ack.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
}

#[tokio::test]
async fn call_without_id_is_skipped_entirely() {
    let mock_server = MockServer::start().await;
    mount_store_result(&mock_server, json!([store_record()])).await;

    let payload = tool_calls_payload(json!([
        {
            "type": "function",
            "function": { "name": "delivery_tracker", "arguments": {"tracking_id": "AB123CD"} }
        },
        tracker_call("call_2", json!({"tracking_id": "AB123CD"}))
    ]));
    let (status, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    assert_eq!(status, StatusCode::OK);
    let outputs = body.as_array().expect("response is a bare array");
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0]["tool_call_id"], "call_2");
}

#[tokio::test]
async fn missing_tracking_id_emits_error_output() {
    let payload = tool_calls_payload(json!([tracker_call("call_1", json!({}))]));
    let (status, body) = post_webhook(offline_state(), payload).await;

    assert_eq!(status, StatusCode::OK);
    let outputs = body.as_array().expect("response is a bare array");
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0]["output"]["status"], "error");
    assert_eq!(outputs[0]["output"]["message"], "Tracking ID is missing.");
}

#[tokio::test]
async fn no_matching_record_emits_not_found_with_raw_id() {
    let mock_server = MockServer::start().await;
    mount_store_result(&mock_server, json!([])).await;

    let payload =
        tool_calls_payload(json!([tracker_call("call_1", json!({"tracking_id": "AB-123 cd"}))]));
    let (status, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    assert_eq!(status, StatusCode::OK);
    let output = &body.as_array().expect("bare array")[0]["output"];
    assert_eq!(output["status"], "not_found");
    assert_eq!(output["message"], "No delivery found for tracking ID: AB-123 cd");
}

#[tokio::test]
async fn matching_record_emits_success_with_summary_and_details() {
    let mock_server = MockServer::start().await;
    mount_store_result(&mock_server, json!([store_record()])).await;

    let payload =
        tool_calls_payload(json!([tracker_call("call_1", json!({"tracking_id": "ab-123 cd"}))]));
    let (status, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    assert_eq!(status, StatusCode::OK);
    let output = &body.as_array().expect("bare array")[0]["output"];
    assert_eq!(output["status"], "success");

    let message = output["message"].as_str().expect("message is a string");
    assert!(message.contains("Priya Shah"));
    assert!(message.contains("+1 555 0100"));
    assert!(message.contains("in transit"));
    assert!(message.contains("tomorrow evening"));

    assert_eq!(output["deliveryDetails"]["tracking_id"], "AB123CD");
    assert_eq!(output["deliveryDetails"]["customerName"], "Priya Shah");
}

#[tokio::test]
async fn first_record_wins_when_store_returns_several() {
    let mock_server = MockServer::start().await;
    let mut second = store_record();
    second["customerName"] = json!("Someone Else");
    mount_store_result(&mock_server, json!([store_record(), second])).await;

    let payload =
        tool_calls_payload(json!([tracker_call("call_1", json!({"tracking_id": "AB123CD"}))]));
    let (_, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    let output = &body.as_array().expect("bare array")[0]["output"];
    assert_eq!(output["deliveryDetails"]["customerName"], "Priya Shah");
}

#[tokio::test]
async fn store_failure_reads_as_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&mock_server)
        .await;

    let payload =
        tool_calls_payload(json!([tracker_call("call_1", json!({"tracking_id": "AB123CD"}))]));
    let (status, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    assert_eq!(status, StatusCode::OK);
    let output = &body.as_array().expect("bare array")[0]["output"];
    assert_eq!(output["status"], "not_found");
}

#[tokio::test]
async fn string_arguments_are_decoded() {
    let mock_server = MockServer::start().await;
    mount_store_result(&mock_server, json!([store_record()])).await;

    let payload = tool_calls_payload(json!([
        tracker_call("call_1", json!("{\"tracking_id\": \"AB123CD\"}"))
    ]));
    let (_, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    let output = &body.as_array().expect("bare array")[0]["output"];
    assert_eq!(output["status"], "success");
}

#[tokio::test]
async fn bad_argument_json_is_isolated_to_its_call() {
    let mock_server = MockServer::start().await;
    mount_store_result(&mock_server, json!([store_record()])).await;

    let payload = tool_calls_payload(json!([
        tracker_call("call_bad", json!("{not valid json")),
        tracker_call("call_good", json!({"tracking_id": "AB123CD"}))
    ]));
    let (status, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    assert_eq!(status, StatusCode::OK);
    let outputs = body.as_array().expect("bare array");
    assert_eq!(outputs.len(), 2);

    assert_eq!(outputs[0]["tool_call_id"], "call_bad");
    assert_eq!(outputs[0]["output"]["status"], "error");

    assert_eq!(outputs[1]["tool_call_id"], "call_good");
    assert_eq!(outputs[1]["output"]["status"], "success");
}

#[tokio::test]
async fn symbols_only_tracking_id_issues_no_store_query() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let payload =
        tool_calls_payload(json!([tracker_call("call_1", json!({"tracking_id": "--- !!"}))]));
    let (status, body) = post_webhook(test_state(&mock_server.uri()), payload).await;

    assert_eq!(status, StatusCode::OK);
    let output = &body.as_array().expect("bare array")[0]["output"];
    assert_eq!(output["status"], "not_found");
}

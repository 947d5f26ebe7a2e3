mod common;

use axum::http::StatusCode;
use axum_test::WsMessage;
use serde_json::{json, Value};

#[tokio::test]
async fn lists_builtin_signs() {
    let server = common::server();
    let body: Value = server.get("/api/gestures").await.json();
    assert_eq!(body["gestures"], json!(["thumbs_up", "victory", "A", "B"]));
}

#[tokio::test]
async fn estimates_thumbs_up() {
    let server = common::server();
    let body: Value = server
        .post("/api/gestures/estimate")
        .json(&json!({ "landmarks": common::thumbs_up() }))
        .await
        .json();

    assert_eq!(body["best"]["name"], "thumbs_up");
    assert!(body["best"]["confidence"].as_f64().unwrap() > 6.5);
    let confidences: Vec<f64> = body["gestures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["confidence"].as_f64().unwrap())
        .collect();
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn min_confidence_above_max_matches_nothing() {
    let server = common::server();
    let body: Value = server
        .post("/api/gestures/estimate")
        .json(&json!({ "landmarks": common::thumbs_up(), "minConfidence": 10.5 }))
        .await
        .json();
    assert!(body["best"].is_null());
    assert_eq!(body["gestures"], json!([]));
}

#[tokio::test]
async fn wrong_landmark_count_is_rejected() {
    let server = common::server();
    let response = server
        .post("/api/gestures/estimate")
        .json(&json!({ "landmarks": [[0.0, 0.0, 0.0]] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("21"));
}

#[tokio::test]
async fn socket_pushes_changes_and_survives_errors() {
    let server = common::ws_server();
    let mut ws = server
        .get_websocket("/api/gestures/ws")
        .await
        .into_websocket()
        .await;

    ws.send_json(&json!({ "type": "frame", "landmarks": common::thumbs_up() }))
        .await;
    let detected: Value = ws.receive_json().await;
    assert_eq!(detected["type"], "detected");
    assert_eq!(detected["name"], "thumbs_up");
    assert!(detected["confidence"].as_f64().unwrap() > 6.5);

    ws.send_message(WsMessage::Binary(vec![1u8, 2, 3].into())).await;
    let error: Value = ws.receive_json().await;
    assert_eq!(error["type"], "error");
    assert_eq!(error["message"], "Binary frames are not supported");

    // still open, and still tracking the detected sign
    ws.send_json(&json!({ "type": "no_hand" })).await;
    let lost: Value = ws.receive_json().await;
    assert_eq!(lost, json!({ "type": "lost" }));

    ws.send_text("not json").await;
    let error: Value = ws.receive_json().await;
    assert_eq!(error["type"], "error");

    ws.send_json(&json!({ "type": "start_practice", "targets": ["thumbs_up"] }))
        .await;
    let target: Value = ws.receive_json().await;
    assert_eq!(target, json!({ "type": "practice_target", "name": "thumbs_up", "remaining": 1 }));

    ws.close().await;
}

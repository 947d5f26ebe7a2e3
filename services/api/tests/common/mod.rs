//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use api_lib::{
    config::Config,
    web::{app, AppState},
};
use axum::http::{header, HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use handspeak_core::gesture::test_hands;
use serde_json::json;
use std::sync::Arc;

fn test_state() -> Arc<AppState> {
    let config = Config {
        cookie_secure: false,
        ..Config::default()
    };
    Arc::new(AppState::in_memory(config))
}

pub fn server() -> TestServer {
    TestServer::new(app(test_state())).unwrap()
}

/// A server bound to a real socket, which WebSocket upgrades need.
pub fn ws_server() -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(app(test_state()))
        .unwrap()
}

/// Pulls `session=<id>` out of a response's `Set-Cookie` header.
pub fn session_cookie(response: &TestResponse) -> (HeaderName, HeaderValue) {
    let set_cookie = response.header(header::SET_COOKIE);
    let pair = set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    assert!(pair.starts_with("session="), "unexpected cookie {pair}");
    (header::COOKIE, HeaderValue::from_str(&pair).unwrap())
}

/// Registers `username` and returns the cookie header of its session.
pub async fn register(server: &TestServer, username: &str) -> (HeaderName, HeaderValue) {
    let response = server
        .post("/api/register")
        .json(&json!({ "username": username, "password": "secret-password" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    session_cookie(&response)
}

/// A straight thumb pointing up over a folded fist, as a `frame` payload.
pub fn thumbs_up() -> Vec<[f32; 3]> {
    test_hands::thumbs_up().points().to_vec()
}

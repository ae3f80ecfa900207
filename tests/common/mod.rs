#![allow(dead_code)]

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (status, body.to_vec())
}

pub async fn json_response(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let json: Value = serde_json::from_slice(&body).expect("body should be json");
    (status, json)
}

pub fn json_request(method: &str, uri: &str, username: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(username) = username {
        builder = builder.header("username", username);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn empty_request(method: &str, uri: &str, username: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(username) = username {
        builder = builder.header("username", username);
    }
    builder.body(Body::empty()).expect("request should build")
}

pub async fn create_user(app: &Router, name: &str, username: &str) -> Value {
    let (status, user) = json_response(
        app,
        json_request(
            "POST",
            "/users",
            None,
            json!({ "name": name, "username": username }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

pub async fn create_todo(app: &Router, username: &str, title: &str) -> (StatusCode, Value) {
    json_response(
        app,
        json_request(
            "POST",
            "/todos",
            Some(username),
            json!({ "title": title, "deadline": "2025-01-01" }),
        ),
    )
    .await
}

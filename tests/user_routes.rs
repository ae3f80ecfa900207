mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use todo_quota_server::test_helpers::{test_app, test_state};

use common::{create_user, empty_request, json_request, json_response, send};

#[tokio::test]
async fn create_user_returns_free_user_without_todos() {
    let app = test_app(test_state());

    let user = create_user(&app, "Ann", "ann").await;

    assert!(Uuid::parse_str(user["id"].as_str().unwrap()).is_ok());
    assert_eq!(user["name"], "Ann");
    assert_eq!(user["username"], "ann");
    assert_eq!(user["pro"], false);
    assert_eq!(user["todos"], json!([]));
}

#[tokio::test]
async fn duplicate_username_is_rejected_and_first_user_kept() {
    let app = test_app(test_state());
    let first = create_user(&app, "Ann", "ann").await;

    let (status, json) = json_response(
        &app,
        json_request(
            "POST",
            "/users",
            None,
            json!({ "name": "Other", "username": "ann" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "Username already exists" }));

    let uri = format!("/users/{}", first["id"].as_str().unwrap());
    let (status, fetched) = json_response(&app, empty_request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, first);
}

#[tokio::test]
async fn get_user_unknown_or_malformed_id_is_not_found() {
    let app = test_app(test_state());

    for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let (status, json) =
            json_response(&app, empty_request("GET", &format!("/users/{id}"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "User not found!");
    }
}

#[tokio::test]
async fn upgrade_to_pro_only_once() {
    let app = test_app(test_state());
    let user = create_user(&app, "Ann", "ann").await;
    let uri = format!("/users/{}/pro", user["id"].as_str().unwrap());

    let (status, upgraded) = json_response(&app, empty_request("PATCH", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upgraded["pro"], true);

    let (status, json) = json_response(&app, empty_request("PATCH", &uri, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Pro plan is already activated.");

    let uri = format!("/users/{}", user["id"].as_str().unwrap());
    let (_, fetched) = json_response(&app, empty_request("GET", &uri, None)).await;
    assert_eq!(fetched["pro"], true);
}

#[tokio::test]
async fn upgrade_unknown_user_is_not_found() {
    let app = test_app(test_state());
    let uri = format!("/users/{}/pro", Uuid::new_v4());

    let (status, _) = json_response(&app, empty_request("PATCH", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_reported_as_json_bad_request() {
    let app = test_app(test_state());

    let (status, json) = json_response(
        &app,
        json_request("POST", "/users", None, json!({ "name": "Ann" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("username"));
}

#[tokio::test]
async fn unknown_route_gets_json_error() {
    let app = test_app(test_state());

    let (status, json) = json_response(&app, empty_request("GET", "/nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Not Found");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app(test_state());

    let (status, body) = send(&app, empty_request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({ "ok": true }));
}

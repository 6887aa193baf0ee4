//! Tests for the user and login handlers.

use super::*;
use crate::domain::{DUPLICATE_USERNAME_MESSAGE, INVALID_LOGIN_MESSAGE};
use crate::inbound::http::api_scope;
use crate::inbound::http::test_utils::memory_state;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

async fn call(
    state: web::Data<HttpState>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(App::new().app_data(state).service(api_scope())).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

fn register_request(username: &str, name: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "username": username, "name": name, "password": password }))
}

#[actix_web::test]
async fn register_returns_created_view_without_password() {
    let (state, _store) = memory_state();
    let (status, body) = call(state, register_request("IWMor", "Corey", "jr*29gW")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "IWMor");
    assert_eq!(body["name"], "Corey");
    assert_eq!(body["blogs"], json!([]));
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn duplicate_username_is_rejected_with_unique_message() {
    let (state, _store) = memory_state();
    let (first, _) = call(state.clone(), register_request("IWMor", "Corey", "jr*29gW")).await;
    assert_eq!(first, StatusCode::CREATED);

    let (status, body) = call(state, register_request("IWMor", "Other", "jr*29gW")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], DUPLICATE_USERNAME_MESSAGE);
    assert!(body["error"].as_str().is_some_and(|m| m.contains("unique")));
}

#[rstest]
#[case::short_username(json!({"username": "ab", "name": "n", "password": "secret"}))]
#[case::short_password(json!({"username": "abc", "name": "n", "password": "pw"}))]
#[case::missing_password(json!({"username": "abc", "name": "n"}))]
#[actix_web::test]
async fn invalid_registrations_are_bad_requests(#[case] payload: Value) {
    let (state, _store) = memory_state();
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(payload);
    let (status, body) = call(state, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|m| m.starts_with("User validation failed: "))
    );
}

#[actix_web::test]
async fn login_issues_token_for_registered_user() {
    let (state, _store) = memory_state();
    call(state.clone(), register_request("IWMor", "Corey", "jr*29gW")).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "IWMor", "password": "jr*29gW" }));
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "IWMor");
    assert_eq!(body["name"], "Corey");
    assert!(body["token"].as_str().is_some_and(|t| t.split('.').count() == 3));
}

#[rstest]
#[case::wrong_password("IWMor", "wrong-password")]
#[case::unknown_user("nobody", "jr*29gW")]
#[actix_web::test]
async fn bad_credentials_are_unauthorized(#[case] username: &str, #[case] password: &str) {
    let (state, _store) = memory_state();
    call(state.clone(), register_request("IWMor", "Corey", "jr*29gW")).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": username, "password": password }));
    let (status, body) = call(state, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID_LOGIN_MESSAGE);
}

#[rstest]
#[case::blank_username(json!({"username": "  ", "password": "pw"}))]
#[case::empty_username(json!({"username": "", "password": "x"}))]
#[case::missing_password(json!({"username": "IWMor"}))]
#[actix_web::test]
async fn blank_login_fields_are_unauthorized(#[case] payload: Value) {
    let (state, _store) = memory_state();
    call(state.clone(), register_request("IWMor", "Corey", "jr*29gW")).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(payload);
    let (status, body) = call(state, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID_LOGIN_MESSAGE);
}

#[actix_web::test]
async fn malformed_json_uses_error_shape() {
    let (state, _store) = memory_state();
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let (status, body) = call(state, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|m| m.starts_with("invalid JSON body")));
}

#[actix_web::test]
async fn list_users_includes_registered_accounts() {
    let (state, _store) = memory_state();
    call(state.clone(), register_request("IWMor", "Corey", "jr*29gW")).await;
    call(state.clone(), register_request("Bret", "Leanne", "hunter2")).await;

    let (status, body) = call(state, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|u| u["username"].as_str())
        .collect();
    assert_eq!(names, vec!["IWMor", "Bret"]);
}

//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value = serde_json::from_slice(&bytes).expect("error JSON");
    (status, trace, value)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("expected `username` to be unique"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("token missing or invalid"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("only the creator can delete a blog"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("blog not found"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_message() {
    let (status, trace, body) = body_of(&Error::not_found("blog not found")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(trace.is_none());
    assert_eq!(body, json!({ "error": "blog not found" }));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_and_keep_trace_id() {
    let trace_id = "00000000-0000-0000-0000-000000000000";
    let error = Error::internal("connection string leaked").with_trace_id(trace_id);
    let (status, trace, body) = body_of(&error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(trace_id));
    assert_eq!(body, json!({ "error": REDACTED_MESSAGE }));
}

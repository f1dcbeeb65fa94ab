//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn unit_mismatch() -> Error {
    Error::invalid_request("Selected unit does not belong to this customer")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "unitId", "code": "unit_mismatch"}))
}

async fn read_payload(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, trace_id, payload)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("admin role required"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("customer not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_their_details(unit_mismatch: Error) {
    let (status, trace_id, payload) = read_payload(&unit_mismatch).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
    assert_eq!(payload, unit_mismatch);
}

#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_the_trace_id() {
    let error = Error::internal("relation \"jobs\" does not exist")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"sql": "select"}));

    let (status, trace_id, payload) = read_payload(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), REDACTED_MESSAGE);
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[actix_web::test]
async fn service_unavailable_is_not_redacted() {
    let error = Error::service_unavailable("customer repository unavailable");

    let (status, trace_id, payload) = read_payload(&error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(trace_id.is_none());
    assert_eq!(payload.message(), "customer repository unavailable");
}

#[test]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}

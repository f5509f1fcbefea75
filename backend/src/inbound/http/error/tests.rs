//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("missing required field: title")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "title"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("authentication required"), StatusCode::UNAUTHORIZED)]
#[case(
    Error::forbidden("You are not authorized to delete this thread"),
    StatusCode::FORBIDDEN
)]
#[case(Error::not_found("Time capsule not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("username already taken"), StatusCode::CONFLICT)]
#[case(
    Error::service_unavailable("database unavailable"),
    StatusCode::SERVICE_UNAVAILABLE
)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.reason(), "Internal server error");
    assert!(redacted.details().is_none());
    assert_eq!(redacted.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_reason_and_details(
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.reason(), "missing required field: title");
    assert_eq!(payload.details(), Some(&json!({"field": "title"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("Invalid capsule status id sent");

    let payload = assert_error_response(error, StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.reason(), "Invalid capsule status id sent");
    assert_eq!(payload.trace_id(), None);
}

#[derive(Debug, Deserialize)]
struct CountParams {
    #[expect(dead_code, reason = "only deserialised to exercise the extractor")]
    count: i64,
}

async fn echo_json(_body: web::Json<CountParams>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn echo_query(_query: web::Query<CountParams>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[rstest]
#[case("{not json", "application/json")]
#[case(r#"{"count": "many"}"#, "application/json")]
#[case(r#"{"count": 1}"#, "text/plain")]
#[actix_web::test]
async fn malformed_json_bodies_are_invalid_requests(
    #[case] body: &'static str,
    #[case] content_type: &'static str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .route("/", web::post().to(echo_json)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["code"], "invalid_body");
}

#[actix_web::test]
async fn malformed_query_strings_are_invalid_requests() {
    let app = actix_test::init_service(
        App::new()
            .app_data(query_config())
            .route("/", web::get().to(echo_query)),
    )
    .await;
    let request = actix_test::TestRequest::get()
        .uri("/?count=many")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_query");
}

async fn echo_path(_id: web::Path<i64>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[actix_web::test]
async fn overflowing_path_ids_are_json_not_found() {
    let app = actix_test::init_service(
        App::new()
            .app_data(path_config())
            .route("/items/{id}", web::get().to(echo_path)),
    )
    .await;
    let request = actix_test::TestRequest::get()
        .uri("/items/99999999999999999999999")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "not_found");
    assert_eq!(value["details"]["code"], "invalid_path");
}

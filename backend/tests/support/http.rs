//! Shared helpers for HTTP contract tests over the in-memory store.

#![allow(
    dead_code,
    reason = "each test binary uses a different subset of the helpers"
)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use timecapsule::Trace;
use timecapsule::domain::ports::Repositories;
use timecapsule::inbound::http::configure;
use timecapsule::inbound::http::health::HealthState;
use timecapsule::inbound::http::state::HttpState;
use timecapsule::outbound::memory::InMemoryStore;

/// Seeded ids of the first row in each lookup table.
pub const DRAFT_STATUS: i64 = 1;
pub const PERSONAL_TYPE: i64 = 1;
pub const TEXT_CONTENT: i64 = 1;
pub const VERIFIED_STATUS: i64 = 2;
pub const DISPROVED_STATUS: i64 = 3;

/// Build the full application over `store`.
pub async fn init_app(
    store: InMemoryStore,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let state = HttpState::from_repositories(
        &Repositories::shared(Arc::new(store)),
        Arc::new(DefaultClock),
    );
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(HealthState::new()))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Send `request` and decode the body as JSON, `null` when empty.
pub async fn send<S, B>(app: &S, request: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}

/// Attach the token header to `request`.
pub fn authed(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header((AUTHORIZATION, format!("Token {token}")))
}

/// Register `username` and return the issued token.
pub async fn register<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": username, "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");
    body["token"]
        .as_str()
        .expect("token in register response")
        .to_owned()
}

/// Create a capsule titled `title` and return its id.
pub async fn create_capsule<S, B>(app: &S, token: &str, title: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        authed(TestRequest::post().uri("/capsules"), token).set_json(json!({
            "status": DRAFT_STATUS,
            "type": PERSONAL_TYPE,
            "title": title,
            "descriptions": "Letters for later",
            "opening_date": "2031-01-01",
            "location_x": 51.5,
            "location_y": -0.12,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create capsule: {body}");
    id_of(&body)
}

/// Attach text content to `capsule` and return its id.
pub async fn create_content<S, B>(app: &S, token: &str, capsule: i64) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        authed(TestRequest::post().uri("/capsulecontents"), token).set_json(json!({
            "capsule": capsule,
            "content_type": TEXT_CONTENT,
            "content": "Dear future me",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create content: {body}");
    id_of(&body)
}

/// Read the `id` field of a created row.
pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("id in response body")
}

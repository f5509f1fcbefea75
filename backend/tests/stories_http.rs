//! Branching story nodes and choices over the HTTP surface.

#[path = "support/http.rs"]
mod http_support;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};
use timecapsule::outbound::memory::InMemoryStore;

use http_support::{authed, create_capsule, create_content, id_of, init_app, register, send};

async fn create_node<S, B>(app: &S, token: &str, content: i64, parent: Option<i64>) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        authed(TestRequest::post().uri("/storynodes"), token).set_json(json!({
            "capsule_content": content,
            "parent_node": parent,
            "content": "You stand at a fork in the road",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create node: {body}");
    id_of(&body)
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(id_of)
        .collect()
}

#[rstest]
#[case("true")]
#[case("TRUE")]
#[case("True")]
#[actix_web::test]
async fn root_nodes_filter_keeps_parentless_nodes(#[case] flag: &str) {
    let app = init_app(InMemoryStore::new()).await;
    let token = register(&app, "ada").await;
    let capsule = create_capsule(&app, &token, "adventure").await;
    let content = create_content(&app, &token, capsule).await;
    let root = create_node(&app, &token, content, None).await;
    create_node(&app, &token, content, Some(root)).await;

    let (status, body) = send(
        &app,
        authed(
            TestRequest::get().uri(&format!("/storynodes?root_nodes={flag}")),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [root]);
}

#[actix_web::test]
async fn other_root_nodes_values_list_everything() {
    let app = init_app(InMemoryStore::new()).await;
    let token = register(&app, "ada").await;
    let capsule = create_capsule(&app, &token, "adventure").await;
    let content = create_content(&app, &token, capsule).await;
    let root = create_node(&app, &token, content, None).await;
    let child = create_node(&app, &token, content, Some(root)).await;

    let (_, body) = send(
        &app,
        authed(TestRequest::get().uri("/storynodes?root_nodes=yes"), &token),
    )
    .await;
    assert_eq!(ids(&body), [root, child]);

    let (_, children) = send(
        &app,
        authed(
            TestRequest::get().uri(&format!("/storynodes?parent_node={root}")),
            &token,
        ),
    )
    .await;
    assert_eq!(ids(&children), [child]);
    assert_eq!(children[0]["parent_node"]["id"], root);
}

#[actix_web::test]
async fn unknown_parent_is_not_found() {
    let app = init_app(InMemoryStore::new()).await;
    let token = register(&app, "ada").await;
    let capsule = create_capsule(&app, &token, "adventure").await;
    let content = create_content(&app, &token, capsule).await;

    let (status, body) = send(
        &app,
        authed(TestRequest::post().uri("/storynodes"), &token).set_json(json!({
            "capsule_content": content,
            "parent_node": 404,
            "content": "lost",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "Invalid parent node id sent");
}

#[actix_web::test]
async fn choices_link_nodes() {
    let app = init_app(InMemoryStore::new()).await;
    let token = register(&app, "ada").await;
    let capsule = create_capsule(&app, &token, "adventure").await;
    let content = create_content(&app, &token, capsule).await;
    let root = create_node(&app, &token, content, None).await;
    let left = create_node(&app, &token, content, Some(root)).await;

    let (status, choice) = send(
        &app,
        authed(TestRequest::post().uri("/storychoices"), &token).set_json(json!({
            "node": root,
            "choice_text": "Go left",
            "next_node": left,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(choice["node"]["id"], root);
    assert_eq!(choice["next_node"]["id"], left);

    let (status, body) = send(
        &app,
        authed(TestRequest::post().uri("/storychoices"), &token).set_json(json!({
            "node": root,
            "choice_text": "Go nowhere",
            "next_node": 999,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "Invalid next_node id sent");

    let (_, listed) = send(
        &app,
        authed(
            TestRequest::get().uri(&format!("/storychoices?node={root}")),
            &token,
        ),
    )
    .await;
    assert_eq!(ids(&listed), [id_of(&choice)]);
}

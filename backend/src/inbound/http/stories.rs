//! Branching story HTTP handlers.
//!
//! ```text
//! GET    /storynodes?capsule_content=1&parent_node=2&root_nodes=true
//! POST   /storynodes {"capsule_content":1,"parent_node":null,"content":"..."}
//! GET|PUT|DELETE /storynodes/{id}
//! GET    /storychoices?node=1&next_node=2
//! POST   /storychoices {"node":1,"choice_text":"...","next_node":2}
//! GET|PUT|DELETE /storychoices/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreateStoryChoiceRequest, CreateStoryNodeRequest, UpdateStoryChoiceRequest,
    UpdateStoryNodeRequest,
};
use crate::domain::{
    CapsuleContentId, Error, StoryChoiceDetail, StoryChoiceFilter, StoryChoiceId,
    StoryNodeDetail, StoryNodeFilter, StoryNodeId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::{ErrorSchema, NestedContentBody, NestedNodeBody, timestamp};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RawId, deserialize_some, parse_id_filter, parse_nullable_id, parse_optional_id,
    parse_required_id, require,
};

const CAPSULE_CONTENT: FieldName = FieldName::new("capsule_content");
const PARENT_NODE: FieldName = FieldName::new("parent_node");
const CONTENT: FieldName = FieldName::new("content");
const NODE: FieldName = FieldName::new("node");
const NEXT_NODE: FieldName = FieldName::new("next_node");
const CHOICE_TEXT: FieldName = FieldName::new("choice_text");

/// Request payload for creating or overwriting a story node.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StoryNodeRequestBody {
    #[schema(value_type = Option<i64>)]
    pub capsule_content: Option<RawId>,
    /// Absent keeps the parent on update; `null` makes the node a root.
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub parent_node: Option<Option<RawId>>,
    pub content: Option<String>,
}

/// Request payload for creating or overwriting a story choice.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StoryChoiceRequestBody {
    #[schema(value_type = Option<i64>)]
    pub node: Option<RawId>,
    pub choice_text: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub next_node: Option<RawId>,
}

/// Query filters for listing story nodes.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StoryNodeQuery {
    /// Only nodes belonging to this content.
    pub capsule_content: Option<String>,
    /// Only direct children of this node.
    pub parent_node: Option<String>,
    /// `true` (any case) keeps only nodes without a parent.
    pub root_nodes: Option<String>,
}

impl StoryNodeQuery {
    fn into_filter(self) -> Result<StoryNodeFilter, Error> {
        Ok(StoryNodeFilter {
            capsule_content: parse_id_filter(self.capsule_content.as_deref(), CAPSULE_CONTENT)?
                .map(CapsuleContentId::new),
            parent_node: parse_id_filter(self.parent_node.as_deref(), PARENT_NODE)?
                .map(StoryNodeId::new),
            roots_only: self
                .root_nodes
                .as_deref()
                .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true")),
        })
    }
}

/// Query filters for listing story choices.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StoryChoiceQuery {
    /// Only choices offered on this node.
    pub node: Option<String>,
    /// Only choices leading to this node.
    pub next_node: Option<String>,
}

impl StoryChoiceQuery {
    fn into_filter(self) -> Result<StoryChoiceFilter, Error> {
        Ok(StoryChoiceFilter {
            node: parse_id_filter(self.node.as_deref(), NODE)?.map(StoryNodeId::new),
            next_node: parse_id_filter(self.next_node.as_deref(), NEXT_NODE)?
                .map(StoryNodeId::new),
        })
    }
}

/// Story node projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoryNodeBody {
    pub id: i64,
    pub capsule_content: NestedContentBody,
    pub parent_node: Option<NestedNodeBody>,
    pub content: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<StoryNodeDetail> for StoryNodeBody {
    fn from(value: StoryNodeDetail) -> Self {
        let StoryNodeDetail {
            node,
            capsule_content,
            parent_node,
        } = value;
        Self {
            id: node.id.get(),
            capsule_content: capsule_content.into(),
            parent_node: parent_node.map(NestedNodeBody::from),
            content: node.content,
            created_at: timestamp(node.created_at),
        }
    }
}

/// Story choice projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoryChoiceBody {
    pub id: i64,
    pub node: NestedNodeBody,
    pub choice_text: String,
    pub next_node: NestedNodeBody,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<StoryChoiceDetail> for StoryChoiceBody {
    fn from(value: StoryChoiceDetail) -> Self {
        let StoryChoiceDetail {
            choice,
            node,
            next_node,
        } = value;
        Self {
            id: choice.id.get(),
            node: node.into(),
            choice_text: choice.choice_text,
            next_node: next_node.into(),
            created_at: timestamp(choice.created_at),
        }
    }
}

fn parse_create_node(body: StoryNodeRequestBody) -> Result<CreateStoryNodeRequest, Error> {
    Ok(CreateStoryNodeRequest {
        capsule_content: CapsuleContentId::new(parse_required_id(
            body.capsule_content,
            CAPSULE_CONTENT,
        )?),
        parent_node: parse_nullable_id(body.parent_node, PARENT_NODE)?
            .flatten()
            .map(StoryNodeId::new),
        content: require(body.content, CONTENT)?,
    })
}

fn parse_update_node(id: i64, body: StoryNodeRequestBody) -> Result<UpdateStoryNodeRequest, Error> {
    Ok(UpdateStoryNodeRequest {
        id: StoryNodeId::new(id),
        capsule_content: parse_optional_id(body.capsule_content, CAPSULE_CONTENT)?
            .map(CapsuleContentId::new),
        parent_node: parse_nullable_id(body.parent_node, PARENT_NODE)?
            .map(|parent| parent.map(StoryNodeId::new)),
        content: body.content,
    })
}

fn parse_create_choice(body: StoryChoiceRequestBody) -> Result<CreateStoryChoiceRequest, Error> {
    Ok(CreateStoryChoiceRequest {
        node: StoryNodeId::new(parse_required_id(body.node, NODE)?),
        choice_text: require(body.choice_text, CHOICE_TEXT)?,
        next_node: StoryNodeId::new(parse_required_id(body.next_node, NEXT_NODE)?),
    })
}

fn parse_update_choice(
    id: i64,
    body: StoryChoiceRequestBody,
) -> Result<UpdateStoryChoiceRequest, Error> {
    Ok(UpdateStoryChoiceRequest {
        id: StoryChoiceId::new(id),
        node: parse_optional_id(body.node, NODE)?.map(StoryNodeId::new),
        choice_text: body.choice_text,
        next_node: parse_optional_id(body.next_node, NEXT_NODE)?.map(StoryNodeId::new),
    })
}

/// List story nodes, optionally filtered.
#[utoipa::path(
    get,
    path = "/storynodes",
    params(StoryNodeQuery),
    responses(
        (status = 200, description = "Story nodes", body = [StoryNodeBody]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "listStoryNodes"
)]
#[get("/storynodes")]
pub async fn list_story_nodes(
    state: web::Data<HttpState>,
    _caller: Caller,
    query: web::Query<StoryNodeQuery>,
) -> ApiResult<web::Json<Vec<StoryNodeBody>>> {
    let filter = query.into_inner().into_filter()?;
    let nodes = state.stories.list_nodes(filter).await?;
    Ok(web::Json(nodes.into_iter().map(StoryNodeBody::from).collect()))
}

/// Fetch one story node.
#[utoipa::path(
    get,
    path = "/storynodes/{id}",
    params(("id" = i64, Path, description = "Story node id")),
    responses(
        (status = 200, description = "Story node", body = StoryNodeBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "getStoryNode"
)]
#[get("/storynodes/{id:\\d+}")]
pub async fn get_story_node(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<StoryNodeBody>> {
    let node = state
        .stories
        .get_node(StoryNodeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(node.into()))
}

/// Create a story node.
#[utoipa::path(
    post,
    path = "/storynodes",
    request_body = StoryNodeRequestBody,
    responses(
        (status = 201, description = "Story node created", body = StoryNodeBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown content or parent node", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "createStoryNode"
)]
#[post("/storynodes")]
pub async fn create_story_node(
    state: web::Data<HttpState>,
    _caller: Caller,
    payload: web::Json<StoryNodeRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_node(payload.into_inner())?;
    let node = state.stories.create_node(request).await?;
    Ok(HttpResponse::Created().json(StoryNodeBody::from(node)))
}

/// Overwrite a story node.
#[utoipa::path(
    put,
    path = "/storynodes/{id}",
    params(("id" = i64, Path, description = "Story node id")),
    request_body = StoryNodeRequestBody,
    responses(
        (status = 204, description = "Story node updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "updateStoryNode"
)]
#[put("/storynodes/{id:\\d+}")]
pub async fn update_story_node(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<StoryNodeRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_update_node(path.into_inner(), payload.into_inner())?;
    state.stories.update_node(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a story node, its descendants, and their choices.
#[utoipa::path(
    delete,
    path = "/storynodes/{id}",
    params(("id" = i64, Path, description = "Story node id")),
    responses(
        (status = 204, description = "Story node deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "deleteStoryNode"
)]
#[delete("/storynodes/{id:\\d+}")]
pub async fn delete_story_node(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .stories
        .delete_node(StoryNodeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List story choices, optionally filtered.
#[utoipa::path(
    get,
    path = "/storychoices",
    params(StoryChoiceQuery),
    responses(
        (status = 200, description = "Story choices", body = [StoryChoiceBody]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "listStoryChoices"
)]
#[get("/storychoices")]
pub async fn list_story_choices(
    state: web::Data<HttpState>,
    _caller: Caller,
    query: web::Query<StoryChoiceQuery>,
) -> ApiResult<web::Json<Vec<StoryChoiceBody>>> {
    let filter = query.into_inner().into_filter()?;
    let choices = state.stories.list_choices(filter).await?;
    Ok(web::Json(
        choices.into_iter().map(StoryChoiceBody::from).collect(),
    ))
}

/// Fetch one story choice.
#[utoipa::path(
    get,
    path = "/storychoices/{id}",
    params(("id" = i64, Path, description = "Story choice id")),
    responses(
        (status = 200, description = "Story choice", body = StoryChoiceBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "getStoryChoice"
)]
#[get("/storychoices/{id:\\d+}")]
pub async fn get_story_choice(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<StoryChoiceBody>> {
    let choice = state
        .stories
        .get_choice(StoryChoiceId::new(path.into_inner()))
        .await?;
    Ok(web::Json(choice.into()))
}

/// Create a story choice.
#[utoipa::path(
    post,
    path = "/storychoices",
    request_body = StoryChoiceRequestBody,
    responses(
        (status = 201, description = "Story choice created", body = StoryChoiceBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown node", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "createStoryChoice"
)]
#[post("/storychoices")]
pub async fn create_story_choice(
    state: web::Data<HttpState>,
    _caller: Caller,
    payload: web::Json<StoryChoiceRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_choice(payload.into_inner())?;
    let choice = state.stories.create_choice(request).await?;
    Ok(HttpResponse::Created().json(StoryChoiceBody::from(choice)))
}

/// Overwrite a story choice.
#[utoipa::path(
    put,
    path = "/storychoices/{id}",
    params(("id" = i64, Path, description = "Story choice id")),
    request_body = StoryChoiceRequestBody,
    responses(
        (status = 204, description = "Story choice updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "updateStoryChoice"
)]
#[put("/storychoices/{id:\\d+}")]
pub async fn update_story_choice(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<StoryChoiceRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_update_choice(path.into_inner(), payload.into_inner())?;
    state.stories.update_choice(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a story choice.
#[utoipa::path(
    delete,
    path = "/storychoices/{id}",
    params(("id" = i64, Path, description = "Story choice id")),
    responses(
        (status = 204, description = "Story choice deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["stories"],
    operation_id = "deleteStoryChoice"
)]
#[delete("/storychoices/{id:\\d+}")]
pub async fn delete_story_choice(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .stories
        .delete_choice(StoryChoiceId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

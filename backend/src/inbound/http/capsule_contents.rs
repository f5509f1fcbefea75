//! Capsule content HTTP handlers.
//!
//! ```text
//! GET    /capsulecontents?capsule=1&content_type=2
//! POST   /capsulecontents {"capsule":1,"content_type":1,"content":"...","media_url":null}
//! GET    /capsulecontents/{id}
//! PUT    /capsulecontents/{id}
//! DELETE /capsulecontents/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateCapsuleContentRequest, UpdateCapsuleContentRequest};
use crate::domain::{
    CapsuleContentDetail, CapsuleContentFilter, CapsuleContentId, CapsuleId, Error, LookupId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::{ErrorSchema, LookupBody, NestedCapsuleBody, timestamp};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RawId, deserialize_some, parse_id_filter, parse_optional_id, parse_required_id,
    require,
};

const CAPSULE: FieldName = FieldName::new("capsule");
const CONTENT_TYPE: FieldName = FieldName::new("content_type");
const CONTENT: FieldName = FieldName::new("content");

/// Request payload for creating or overwriting capsule content.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CapsuleContentRequestBody {
    #[schema(value_type = Option<i64>)]
    pub capsule: Option<RawId>,
    #[schema(value_type = Option<i64>)]
    pub content_type: Option<RawId>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub media_url: Option<Option<String>>,
}

/// Query filters for listing capsule content.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CapsuleContentQuery {
    /// Only content in this capsule.
    pub capsule: Option<String>,
    /// Only content of this type.
    pub content_type: Option<String>,
}

impl CapsuleContentQuery {
    fn into_filter(self) -> Result<CapsuleContentFilter, Error> {
        Ok(CapsuleContentFilter {
            capsule: parse_id_filter(self.capsule.as_deref(), CAPSULE)?.map(CapsuleId::new),
            content_type: parse_id_filter(self.content_type.as_deref(), CONTENT_TYPE)?
                .map(LookupId::new),
        })
    }
}

/// Capsule content projection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CapsuleContentBody {
    pub id: i64,
    pub capsule: NestedCapsuleBody,
    pub content_type: LookupBody,
    pub content: String,
    pub media_url: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<CapsuleContentDetail> for CapsuleContentBody {
    fn from(value: CapsuleContentDetail) -> Self {
        let CapsuleContentDetail {
            content,
            capsule,
            content_type,
        } = value;
        Self {
            id: content.id.get(),
            capsule: capsule.into(),
            content_type: content_type.into(),
            content: content.content,
            media_url: content.media_url,
            created_at: timestamp(content.created_at),
        }
    }
}

fn parse_create(body: CapsuleContentRequestBody) -> Result<CreateCapsuleContentRequest, Error> {
    Ok(CreateCapsuleContentRequest {
        capsule: CapsuleId::new(parse_required_id(body.capsule, CAPSULE)?),
        content_type: LookupId::new(parse_required_id(body.content_type, CONTENT_TYPE)?),
        content: require(body.content, CONTENT)?,
        media_url: body.media_url.flatten(),
    })
}

fn parse_update(
    id: i64,
    body: CapsuleContentRequestBody,
) -> Result<UpdateCapsuleContentRequest, Error> {
    Ok(UpdateCapsuleContentRequest {
        id: CapsuleContentId::new(id),
        capsule: parse_optional_id(body.capsule, CAPSULE)?.map(CapsuleId::new),
        content_type: parse_optional_id(body.content_type, CONTENT_TYPE)?.map(LookupId::new),
        content: body.content,
        media_url: body.media_url,
    })
}

/// List capsule content, optionally filtered.
#[utoipa::path(
    get,
    path = "/capsulecontents",
    params(CapsuleContentQuery),
    responses(
        (status = 200, description = "Capsule content", body = [CapsuleContentBody]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["capsule contents"],
    operation_id = "listCapsuleContents"
)]
#[get("/capsulecontents")]
pub async fn list_capsule_contents(
    state: web::Data<HttpState>,
    _caller: Caller,
    query: web::Query<CapsuleContentQuery>,
) -> ApiResult<web::Json<Vec<CapsuleContentBody>>> {
    let filter = query.into_inner().into_filter()?;
    let contents = state.capsule_contents.list(filter).await?;
    Ok(web::Json(
        contents.into_iter().map(CapsuleContentBody::from).collect(),
    ))
}

/// Fetch one content row.
#[utoipa::path(
    get,
    path = "/capsulecontents/{id}",
    params(("id" = i64, Path, description = "Capsule content id")),
    responses(
        (status = 200, description = "Capsule content", body = CapsuleContentBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["capsule contents"],
    operation_id = "getCapsuleContent"
)]
#[get("/capsulecontents/{id:\\d+}")]
pub async fn get_capsule_content(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CapsuleContentBody>> {
    let content = state
        .capsule_contents
        .get(CapsuleContentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(content.into()))
}

/// Attach content to a capsule.
#[utoipa::path(
    post,
    path = "/capsulecontents",
    request_body = CapsuleContentRequestBody,
    responses(
        (status = 201, description = "Content created", body = CapsuleContentBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown capsule or content type", body = ErrorSchema)
    ),
    tags = ["capsule contents"],
    operation_id = "createCapsuleContent"
)]
#[post("/capsulecontents")]
pub async fn create_capsule_content(
    state: web::Data<HttpState>,
    _caller: Caller,
    payload: web::Json<CapsuleContentRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(payload.into_inner())?;
    let content = state.capsule_contents.create(request).await?;
    Ok(HttpResponse::Created().json(CapsuleContentBody::from(content)))
}

/// Overwrite capsule content.
#[utoipa::path(
    put,
    path = "/capsulecontents/{id}",
    params(("id" = i64, Path, description = "Capsule content id")),
    request_body = CapsuleContentRequestBody,
    responses(
        (status = 204, description = "Content updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["capsule contents"],
    operation_id = "updateCapsuleContent"
)]
#[put("/capsulecontents/{id:\\d+}")]
pub async fn update_capsule_content(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<CapsuleContentRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_update(path.into_inner(), payload.into_inner())?;
    state.capsule_contents.update(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete content together with its predictions and story nodes.
#[utoipa::path(
    delete,
    path = "/capsulecontents/{id}",
    params(("id" = i64, Path, description = "Capsule content id")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["capsule contents"],
    operation_id = "deleteCapsuleContent"
)]
#[delete("/capsulecontents/{id:\\d+}")]
pub async fn delete_capsule_content(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .capsule_contents
        .delete(CapsuleContentId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

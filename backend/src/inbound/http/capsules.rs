//! Capsule HTTP handlers.
//!
//! ```text
//! GET    /capsules
//! POST   /capsules {"status":1,"type":1,"title":"...","descriptions":"...",
//!                   "opening_date":"2031-01-01","location_x":1.0,"location_y":2.0}
//! GET    /capsules/{id}
//! PUT    /capsules/{id}
//! DELETE /capsules/{id}
//! ```
//!
//! Create also accepts the legacy keys `description`, `openingDate`, `x`,
//! and `y`.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::{CreateCapsuleRequest, UpdateCapsuleRequest};
use crate::domain::{CapsuleId, Error, LookupId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::{CapsuleBody, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RawId, RawNumber, parse_optional_id, parse_optional_number,
    parse_optional_timestamp, parse_required_id, parse_required_number, parse_required_timestamp,
    require,
};

/// Request payload for creating or overwriting a capsule.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CapsuleRequestBody {
    #[schema(value_type = Option<i64>)]
    pub status: Option<RawId>,
    #[serde(rename = "type")]
    #[schema(value_type = Option<i64>)]
    pub capsule_type: Option<RawId>,
    pub title: Option<String>,
    #[serde(alias = "description")]
    pub descriptions: Option<String>,
    #[serde(alias = "openingDate")]
    #[schema(example = "2031-01-01T00:00:00Z")]
    pub opening_date: Option<String>,
    #[serde(alias = "x")]
    #[schema(value_type = Option<f64>)]
    pub location_x: Option<RawNumber>,
    #[serde(alias = "y")]
    #[schema(value_type = Option<f64>)]
    pub location_y: Option<RawNumber>,
}

const STATUS: FieldName = FieldName::new("status");
const TYPE: FieldName = FieldName::new("type");
const TITLE: FieldName = FieldName::new("title");
const DESCRIPTIONS: FieldName = FieldName::new("descriptions");
const OPENING_DATE: FieldName = FieldName::new("opening_date");
const LOCATION_X: FieldName = FieldName::new("location_x");
const LOCATION_Y: FieldName = FieldName::new("location_y");

fn parse_create(body: CapsuleRequestBody, caller: &Caller) -> Result<CreateCapsuleRequest, Error> {
    Ok(CreateCapsuleRequest {
        creator: caller.id(),
        status: LookupId::new(parse_required_id(body.status, STATUS)?),
        capsule_type: LookupId::new(parse_required_id(body.capsule_type, TYPE)?),
        title: require(body.title, TITLE)?,
        descriptions: require(body.descriptions, DESCRIPTIONS)?,
        opening_date: parse_required_timestamp(body.opening_date, OPENING_DATE)?,
        location_x: parse_required_number(body.location_x, LOCATION_X)?,
        location_y: parse_required_number(body.location_y, LOCATION_Y)?,
    })
}

fn parse_update(id: i64, body: CapsuleRequestBody) -> Result<UpdateCapsuleRequest, Error> {
    Ok(UpdateCapsuleRequest {
        id: CapsuleId::new(id),
        status: parse_optional_id(body.status, STATUS)?.map(LookupId::new),
        capsule_type: parse_optional_id(body.capsule_type, TYPE)?.map(LookupId::new),
        title: body.title,
        descriptions: body.descriptions,
        opening_date: parse_optional_timestamp(body.opening_date, OPENING_DATE)?,
        location_x: parse_optional_number(body.location_x, LOCATION_X)?,
        location_y: parse_optional_number(body.location_y, LOCATION_Y)?,
    })
}

/// List every capsule.
#[utoipa::path(
    get,
    path = "/capsules",
    responses(
        (status = 200, description = "Capsules", body = [CapsuleBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["capsules"],
    operation_id = "listCapsules"
)]
#[get("/capsules")]
pub async fn list_capsules(
    state: web::Data<HttpState>,
    _caller: Caller,
) -> ApiResult<web::Json<Vec<CapsuleBody>>> {
    let capsules = state.capsules.list().await?;
    Ok(web::Json(capsules.into_iter().map(CapsuleBody::from).collect()))
}

/// Fetch one capsule.
#[utoipa::path(
    get,
    path = "/capsules/{id}",
    params(("id" = i64, Path, description = "Capsule id")),
    responses(
        (status = 200, description = "Capsule", body = CapsuleBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["capsules"],
    operation_id = "getCapsule"
)]
#[get("/capsules/{id:\\d+}")]
pub async fn get_capsule(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CapsuleBody>> {
    let capsule = state.capsules.get(CapsuleId::new(path.into_inner())).await?;
    Ok(web::Json(capsule.into()))
}

/// Create a capsule owned by the caller.
#[utoipa::path(
    post,
    path = "/capsules",
    request_body = CapsuleRequestBody,
    responses(
        (status = 201, description = "Capsule created", body = CapsuleBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown status or type", body = ErrorSchema)
    ),
    tags = ["capsules"],
    operation_id = "createCapsule"
)]
#[post("/capsules")]
pub async fn create_capsule(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CapsuleRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(payload.into_inner(), &caller)?;
    let capsule = state.capsules.create(request).await?;
    Ok(HttpResponse::Created().json(CapsuleBody::from(capsule)))
}

/// Overwrite a capsule.
#[utoipa::path(
    put,
    path = "/capsules/{id}",
    params(("id" = i64, Path, description = "Capsule id")),
    request_body = CapsuleRequestBody,
    responses(
        (status = 204, description = "Capsule updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["capsules"],
    operation_id = "updateCapsule"
)]
#[put("/capsules/{id:\\d+}")]
pub async fn update_capsule(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<CapsuleRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_update(path.into_inner(), payload.into_inner())?;
    state.capsules.update(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a capsule and everything attached to it.
#[utoipa::path(
    delete,
    path = "/capsules/{id}",
    params(("id" = i64, Path, description = "Capsule id")),
    responses(
        (status = 204, description = "Capsule deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["capsules"],
    operation_id = "deleteCapsule"
)]
#[delete("/capsules/{id:\\d+}")]
pub async fn delete_capsule(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.capsules.delete(CapsuleId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

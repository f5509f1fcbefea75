//! Read-only lookup table handlers.
//!
//! Each table exposes `GET /<table>` ordered by id and `GET /<table>/{id}`.

use actix_web::{get, web};

use crate::domain::{LookupId, LookupKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::{ErrorSchema, LookupBody};
use crate::inbound::http::state::HttpState;

async fn list_kind(state: &HttpState, kind: LookupKind) -> ApiResult<web::Json<Vec<LookupBody>>> {
    let rows = state.lookups.list(kind).await?;
    Ok(web::Json(rows.into_iter().map(LookupBody::from).collect()))
}

async fn get_kind(state: &HttpState, kind: LookupKind, id: i64) -> ApiResult<web::Json<LookupBody>> {
    let row = state.lookups.get(kind, LookupId::new(id)).await?;
    Ok(web::Json(row.into()))
}

/// List capsule statuses.
#[utoipa::path(
    get,
    path = "/capsulestatuses",
    responses(
        (status = 200, description = "Capsule statuses", body = [LookupBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "listCapsuleStatuses"
)]
#[get("/capsulestatuses")]
pub async fn list_capsule_statuses(
    state: web::Data<HttpState>,
    _caller: Caller,
) -> ApiResult<web::Json<Vec<LookupBody>>> {
    list_kind(&state, LookupKind::CapsuleStatus).await
}

/// Fetch one capsule status.
#[utoipa::path(
    get,
    path = "/capsulestatuses/{id}",
    params(("id" = i64, Path, description = "Capsule status id")),
    responses(
        (status = 200, description = "Capsule status", body = LookupBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "getCapsuleStatus"
)]
#[get("/capsulestatuses/{id:\\d+}")]
pub async fn get_capsule_status(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LookupBody>> {
    get_kind(&state, LookupKind::CapsuleStatus, path.into_inner()).await
}

/// List capsule types.
#[utoipa::path(
    get,
    path = "/capsuletypes",
    responses(
        (status = 200, description = "Capsule types", body = [LookupBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "listCapsuleTypes"
)]
#[get("/capsuletypes")]
pub async fn list_capsule_types(
    state: web::Data<HttpState>,
    _caller: Caller,
) -> ApiResult<web::Json<Vec<LookupBody>>> {
    list_kind(&state, LookupKind::CapsuleType).await
}

/// Fetch one capsule type.
#[utoipa::path(
    get,
    path = "/capsuletypes/{id}",
    params(("id" = i64, Path, description = "Capsule type id")),
    responses(
        (status = 200, description = "Capsule type", body = LookupBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "getCapsuleType"
)]
#[get("/capsuletypes/{id:\\d+}")]
pub async fn get_capsule_type(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LookupBody>> {
    get_kind(&state, LookupKind::CapsuleType, path.into_inner()).await
}

/// List verification statuses.
#[utoipa::path(
    get,
    path = "/verificationstatuses",
    responses(
        (status = 200, description = "Verification statuses", body = [LookupBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "listVerificationStatuses"
)]
#[get("/verificationstatuses")]
pub async fn list_verification_statuses(
    state: web::Data<HttpState>,
    _caller: Caller,
) -> ApiResult<web::Json<Vec<LookupBody>>> {
    list_kind(&state, LookupKind::VerificationStatus).await
}

/// Fetch one verification status.
#[utoipa::path(
    get,
    path = "/verificationstatuses/{id}",
    params(("id" = i64, Path, description = "Verification status id")),
    responses(
        (status = 200, description = "Verification status", body = LookupBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "getVerificationStatus"
)]
#[get("/verificationstatuses/{id:\\d+}")]
pub async fn get_verification_status(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LookupBody>> {
    get_kind(&state, LookupKind::VerificationStatus, path.into_inner()).await
}

/// List content types.
#[utoipa::path(
    get,
    path = "/contenttypes",
    responses(
        (status = 200, description = "Content types", body = [LookupBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "listContentTypes"
)]
#[get("/contenttypes")]
pub async fn list_content_types(
    state: web::Data<HttpState>,
    _caller: Caller,
) -> ApiResult<web::Json<Vec<LookupBody>>> {
    list_kind(&state, LookupKind::ContentType).await
}

/// Fetch one content type.
#[utoipa::path(
    get,
    path = "/contenttypes/{id}",
    params(("id" = i64, Path, description = "Content type id")),
    responses(
        (status = 200, description = "Content type", body = LookupBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lookups"],
    operation_id = "getContentType"
)]
#[get("/contenttypes/{id:\\d+}")]
pub async fn get_content_type(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LookupBody>> {
    get_kind(&state, LookupKind::ContentType, path.into_inner()).await
}

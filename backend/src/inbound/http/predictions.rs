//! Prediction HTTP handlers.
//!
//! ```text
//! GET    /predictions?capsule_content=1&verification_status=2&category=weather
//! POST   /predictions {"capsule_content":1,"prediction_text":"...","category":"weather"}
//! GET|PUT|DELETE /predictions/{id}
//! POST   /predictions/{id}/verify {"verification_status":2}
//! GET    /predictions/statistics
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreatePredictionRequest, UpdatePredictionRequest, VerifyPredictionRequest,
};
use crate::domain::{
    AccuracyStats, CapsuleContentId, Error, LookupId, PredictionDetail, PredictionFilter,
    PredictionId, PredictionStatistics,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::{
    ErrorSchema, LookupBody, NestedContentBody, ProfileBody, timestamp,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RawId, deserialize_some, parse_id_filter, parse_optional_id, parse_required_id,
    require,
};

const CAPSULE_CONTENT: FieldName = FieldName::new("capsule_content");
const PREDICTION_TEXT: FieldName = FieldName::new("prediction_text");
const VERIFICATION_STATUS: FieldName = FieldName::new("verification_status");

/// Request payload for creating or overwriting a prediction.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PredictionRequestBody {
    #[schema(value_type = Option<i64>)]
    pub capsule_content: Option<RawId>,
    pub prediction_text: Option<String>,
    /// Absent keeps the category on update; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
}

/// Request payload for verifying a prediction.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyRequestBody {
    #[schema(value_type = Option<i64>)]
    pub verification_status: Option<RawId>,
}

/// Query filters for listing predictions.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PredictionQuery {
    /// Only predictions sealed in this content.
    pub capsule_content: Option<String>,
    /// Only predictions in this verification status.
    pub verification_status: Option<String>,
    /// Only predictions with exactly this category.
    pub category: Option<String>,
}

impl PredictionQuery {
    fn into_filter(self) -> Result<PredictionFilter, Error> {
        Ok(PredictionFilter {
            capsule_content: parse_id_filter(self.capsule_content.as_deref(), CAPSULE_CONTENT)?
                .map(CapsuleContentId::new),
            verification_status: parse_id_filter(
                self.verification_status.as_deref(),
                VERIFICATION_STATUS,
            )?
            .map(LookupId::new),
            category: self.category.filter(|category| !category.is_empty()),
            verified_by: None,
        })
    }
}

/// Prediction projection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PredictionBody {
    pub id: i64,
    pub capsule_content: NestedContentBody,
    pub prediction_text: String,
    pub category: Option<String>,
    pub verification_status: LookupBody,
    #[schema(format = "date-time")]
    pub verification_date: Option<String>,
    pub verification_user: Option<ProfileBody>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<PredictionDetail> for PredictionBody {
    fn from(value: PredictionDetail) -> Self {
        let PredictionDetail {
            prediction,
            capsule_content,
            verification_status,
            verification_user,
        } = value;
        Self {
            id: prediction.id.get(),
            capsule_content: capsule_content.into(),
            prediction_text: prediction.prediction_text,
            category: prediction.category,
            verification_status: verification_status.into(),
            verification_date: prediction.verification_date.map(timestamp),
            verification_user: verification_user.map(ProfileBody::from),
            created_at: timestamp(prediction.created_at),
        }
    }
}

/// Verified versus disproved counts.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AccuracyStatsBody {
    pub verified: u64,
    pub disproved: u64,
    pub total_verified: u64,
    #[schema(example = 66.66666666666667)]
    pub accuracy_percentage: f64,
}

impl From<AccuracyStats> for AccuracyStatsBody {
    fn from(value: AccuracyStats) -> Self {
        Self {
            verified: value.verified,
            disproved: value.disproved,
            total_verified: value.total_verified,
            accuracy_percentage: value.accuracy_percentage,
        }
    }
}

/// Aggregate prediction counts.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PredictionStatisticsBody {
    /// Count per verification status name, zero counts included.
    pub verification_stats: BTreeMap<String, u64>,
    /// Count per non-empty category.
    pub category_stats: BTreeMap<String, u64>,
    pub accuracy_stats: AccuracyStatsBody,
}

impl From<PredictionStatistics> for PredictionStatisticsBody {
    fn from(value: PredictionStatistics) -> Self {
        Self {
            verification_stats: value.verification_stats,
            category_stats: value.category_stats,
            accuracy_stats: value.accuracy_stats.into(),
        }
    }
}

fn parse_create(body: PredictionRequestBody) -> Result<CreatePredictionRequest, Error> {
    Ok(CreatePredictionRequest {
        capsule_content: CapsuleContentId::new(parse_required_id(
            body.capsule_content,
            CAPSULE_CONTENT,
        )?),
        prediction_text: require(body.prediction_text, PREDICTION_TEXT)?,
        category: body.category.flatten(),
    })
}

fn parse_update(id: i64, body: PredictionRequestBody) -> Result<UpdatePredictionRequest, Error> {
    Ok(UpdatePredictionRequest {
        id: PredictionId::new(id),
        capsule_content: parse_optional_id(body.capsule_content, CAPSULE_CONTENT)?
            .map(CapsuleContentId::new),
        prediction_text: body.prediction_text,
        category: body.category,
    })
}

/// List predictions, optionally filtered.
#[utoipa::path(
    get,
    path = "/predictions",
    params(PredictionQuery),
    responses(
        (status = 200, description = "Predictions", body = [PredictionBody]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "listPredictions"
)]
#[get("/predictions")]
pub async fn list_predictions(
    state: web::Data<HttpState>,
    _caller: Caller,
    query: web::Query<PredictionQuery>,
) -> ApiResult<web::Json<Vec<PredictionBody>>> {
    let filter = query.into_inner().into_filter()?;
    let predictions = state.predictions.list(filter).await?;
    Ok(web::Json(
        predictions.into_iter().map(PredictionBody::from).collect(),
    ))
}

/// Fetch one prediction.
#[utoipa::path(
    get,
    path = "/predictions/{id}",
    params(("id" = i64, Path, description = "Prediction id")),
    responses(
        (status = 200, description = "Prediction", body = PredictionBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "getPrediction"
)]
#[get("/predictions/{id:\\d+}")]
pub async fn get_prediction(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PredictionBody>> {
    let prediction = state
        .predictions
        .get(PredictionId::new(path.into_inner()))
        .await?;
    Ok(web::Json(prediction.into()))
}

/// Seal a prediction in capsule content. New predictions start `pending`.
#[utoipa::path(
    post,
    path = "/predictions",
    request_body = PredictionRequestBody,
    responses(
        (status = 201, description = "Prediction created", body = PredictionBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown content or missing pending status", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "createPrediction"
)]
#[post("/predictions")]
pub async fn create_prediction(
    state: web::Data<HttpState>,
    _caller: Caller,
    payload: web::Json<PredictionRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(payload.into_inner())?;
    let prediction = state.predictions.create(request).await?;
    Ok(HttpResponse::Created().json(PredictionBody::from(prediction)))
}

/// Overwrite a prediction's text, content, or category.
#[utoipa::path(
    put,
    path = "/predictions/{id}",
    params(("id" = i64, Path, description = "Prediction id")),
    request_body = PredictionRequestBody,
    responses(
        (status = 204, description = "Prediction updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "updatePrediction"
)]
#[put("/predictions/{id:\\d+}")]
pub async fn update_prediction(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<PredictionRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_update(path.into_inner(), payload.into_inner())?;
    state.predictions.update(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a prediction.
#[utoipa::path(
    delete,
    path = "/predictions/{id}",
    params(("id" = i64, Path, description = "Prediction id")),
    responses(
        (status = 204, description = "Prediction deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "deletePrediction"
)]
#[delete("/predictions/{id:\\d+}")]
pub async fn delete_prediction(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .predictions
        .delete(PredictionId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record a verification outcome. The caller becomes the verifier.
#[utoipa::path(
    post,
    path = "/predictions/{id}/verify",
    params(("id" = i64, Path, description = "Prediction id")),
    request_body = VerifyRequestBody,
    responses(
        (status = 204, description = "Prediction verified"),
        (status = 400, description = "Missing verification status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown prediction or status", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "verifyPrediction"
)]
#[post("/predictions/{id:\\d+}/verify")]
pub async fn verify_prediction(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<VerifyRequestBody>,
) -> ApiResult<HttpResponse> {
    let status = parse_optional_id(payload.into_inner().verification_status, VERIFICATION_STATUS)?;
    state
        .predictions
        .verify(VerifyPredictionRequest {
            id: PredictionId::new(path.into_inner()),
            verification_status: status.map(LookupId::new),
            verifier: caller.id(),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Counts by verification status and category, plus accuracy.
#[utoipa::path(
    get,
    path = "/predictions/statistics",
    responses(
        (status = 200, description = "Prediction statistics", body = PredictionStatisticsBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "predictionStatistics"
)]
#[get("/predictions/statistics")]
pub async fn prediction_statistics(
    state: web::Data<HttpState>,
    _caller: Caller,
) -> ApiResult<web::Json<PredictionStatisticsBody>> {
    let statistics = state.predictions.statistics().await?;
    Ok(web::Json(statistics.into()))
}

//! Driving port for prediction use-cases.

use async_trait::async_trait;

use crate::domain::{
    CapsuleContentId, Error, LookupId, PredictionDetail, PredictionFilter, PredictionId,
    PredictionStatistics, ProfileId,
};

/// Fields accepted when creating a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePredictionRequest {
    /// Content the prediction is sealed in.
    pub capsule_content: CapsuleContentId,
    /// Forecast text.
    pub prediction_text: String,
    /// Free-text category.
    pub category: Option<String>,
}

/// Overwrite of a prediction's authored fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePredictionRequest {
    /// Prediction to overwrite.
    pub id: PredictionId,
    /// Replacement content, if any.
    pub capsule_content: Option<CapsuleContentId>,
    /// Forecast text; required, checked once the prediction is found.
    pub prediction_text: Option<String>,
    /// `None` keeps the category; `Some(None)` clears it.
    pub category: Option<Option<String>>,
}

/// Verification of a prediction by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPredictionRequest {
    /// Prediction being verified.
    pub id: PredictionId,
    /// New verification status; required, checked after the prediction.
    pub verification_status: Option<LookupId>,
    /// Authenticated caller.
    pub verifier: ProfileId,
}

/// Domain use-case port for predictions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Predictions matching `filter`, ordered by id.
    async fn list(&self, filter: PredictionFilter) -> Result<Vec<PredictionDetail>, Error>;

    /// Fetch one prediction.
    async fn get(&self, id: PredictionId) -> Result<PredictionDetail, Error>;

    /// Create a prediction in the `pending` status.
    async fn create(&self, request: CreatePredictionRequest) -> Result<PredictionDetail, Error>;

    /// Overwrite a prediction. Verification fields are untouched.
    async fn update(&self, request: UpdatePredictionRequest) -> Result<(), Error>;

    /// Delete a prediction.
    async fn delete(&self, id: PredictionId) -> Result<(), Error>;

    /// Record a verification outcome stamped with the caller and clock time.
    async fn verify(&self, request: VerifyPredictionRequest) -> Result<(), Error>;

    /// Aggregate counts over every prediction.
    async fn statistics(&self) -> Result<PredictionStatistics, Error>;
}

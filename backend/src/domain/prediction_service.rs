//! Prediction domain service: CRUD, verification, and statistics.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use crate::domain::lookup::PENDING_VERIFICATION;
use crate::domain::ports::{
    AccountRepository, CapsuleContentRepository, CreatePredictionRequest, LookupRepository,
    PredictionRepository, PredictionService, UpdatePredictionRequest, VerifyPredictionRequest,
};
use crate::domain::service_support::{
    ensure_max_chars, referenced_but_missing, require_lookup, required, stored_lookup,
};
use crate::domain::{
    CATEGORY_MAX_CHARS, CapsuleContentId, Error, LookupKind, NewPrediction, Prediction,
    PredictionDetail, PredictionFilter, PredictionId, PredictionStatistics,
};

const INVALID_CAPSULE_CONTENT: &str = "Invalid capsule content id sent";
const INVALID_VERIFICATION_STATUS: &str = "Invalid verification status id sent";

fn prediction_not_found() -> Error {
    Error::not_found("Prediction not found")
}

fn check_category(category: Option<&str>) -> Result<(), Error> {
    category.map_or(Ok(()), |value| {
        ensure_max_chars("category", value, CATEGORY_MAX_CHARS)
    })
}

/// Prediction service implementing [`PredictionService`].
#[derive(Clone)]
pub struct Predictions {
    predictions: Arc<dyn PredictionRepository>,
    contents: Arc<dyn CapsuleContentRepository>,
    lookups: Arc<dyn LookupRepository>,
    accounts: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
}

impl Predictions {
    /// Create the service over its repositories and clock.
    pub fn new(
        predictions: Arc<dyn PredictionRepository>,
        contents: Arc<dyn CapsuleContentRepository>,
        lookups: Arc<dyn LookupRepository>,
        accounts: Arc<dyn AccountRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            predictions,
            contents,
            lookups,
            accounts,
            clock,
        }
    }

    async fn require_content(&self, id: CapsuleContentId) -> Result<(), Error> {
        match self.contents.find(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(INVALID_CAPSULE_CONTENT)),
        }
    }

    async fn find(&self, id: PredictionId) -> Result<Prediction, Error> {
        self.predictions
            .find(id)
            .await?
            .ok_or_else(prediction_not_found)
    }

    async fn persist(&self, prediction: &Prediction) -> Result<(), Error> {
        let updated = self.predictions.update(prediction).await.map_err(|err| {
            error!(prediction_id = %prediction.id, error = %err, "error updating prediction");
            Error::from(err)
        })?;
        if updated {
            Ok(())
        } else {
            Err(prediction_not_found())
        }
    }

    async fn detail(&self, prediction: Prediction) -> Result<PredictionDetail, Error> {
        let capsule_content = self
            .contents
            .find(prediction.capsule_content)
            .await?
            .ok_or_else(|| referenced_but_missing("capsule content", prediction.capsule_content))?;
        let verification_status = stored_lookup(
            self.lookups.as_ref(),
            LookupKind::VerificationStatus,
            prediction.verification_status,
        )
        .await?;
        let verification_user = match prediction.verification_user {
            Some(profile_id) => Some(
                self.accounts
                    .find_profile(profile_id)
                    .await?
                    .ok_or_else(|| referenced_but_missing("profile", profile_id))?,
            ),
            None => None,
        };
        Ok(PredictionDetail {
            prediction,
            capsule_content,
            verification_status,
            verification_user,
        })
    }
}

#[async_trait]
impl PredictionService for Predictions {
    async fn list(&self, filter: PredictionFilter) -> Result<Vec<PredictionDetail>, Error> {
        let rows = self.predictions.list(&filter).await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.detail(row).await?);
        }
        Ok(details)
    }

    async fn get(&self, id: PredictionId) -> Result<PredictionDetail, Error> {
        let prediction = self.find(id).await?;
        self.detail(prediction).await
    }

    async fn create(&self, request: CreatePredictionRequest) -> Result<PredictionDetail, Error> {
        check_category(request.category.as_deref())?;
        self.require_content(request.capsule_content).await?;
        let pending = self
            .lookups
            .find_by_name(LookupKind::VerificationStatus, PENDING_VERIFICATION)
            .await?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "Verification status '{PENDING_VERIFICATION}' not found"
                ))
            })?;

        let prediction = self
            .predictions
            .insert(&NewPrediction {
                capsule_content: request.capsule_content,
                prediction_text: request.prediction_text,
                category: request.category,
                verification_status: pending.id,
                created_at: self.clock.utc(),
            })
            .await?;
        self.detail(prediction).await
    }

    async fn update(&self, request: UpdatePredictionRequest) -> Result<(), Error> {
        let mut prediction = self.find(request.id).await?;
        let prediction_text = required("prediction_text", request.prediction_text)?;
        if let Some(category) = &request.category {
            check_category(category.as_deref())?;
        }

        if let Some(capsule_content) = request.capsule_content {
            self.require_content(capsule_content).await?;
            prediction.capsule_content = capsule_content;
        }
        if let Some(category) = request.category {
            prediction.category = category;
        }
        prediction.prediction_text = prediction_text;

        self.persist(&prediction).await
    }

    async fn delete(&self, id: PredictionId) -> Result<(), Error> {
        if self.predictions.delete(id).await? {
            Ok(())
        } else {
            Err(prediction_not_found())
        }
    }

    async fn verify(&self, request: VerifyPredictionRequest) -> Result<(), Error> {
        let mut prediction = self.find(request.id).await?;
        let status_id = required("verification_status", request.verification_status)?;
        let status = require_lookup(
            self.lookups.as_ref(),
            LookupKind::VerificationStatus,
            status_id,
            INVALID_VERIFICATION_STATUS,
        )
        .await?;

        prediction.verification_status = status.id;
        prediction.verification_user = Some(request.verifier);
        prediction.verification_date = Some(self.clock.utc());

        self.persist(&prediction).await
    }

    async fn statistics(&self) -> Result<PredictionStatistics, Error> {
        let statuses = self.lookups.list(LookupKind::VerificationStatus).await?;
        let predictions = self
            .predictions
            .list(&PredictionFilter::default())
            .await
            .map_err(|err| {
                error!(error = %err, "error loading prediction statistics");
                Error::from(err)
            })?;
        Ok(PredictionStatistics::tally(&statuses, &predictions))
    }
}

#[cfg(test)]
#[path = "prediction_service_tests.rs"]
mod tests;

//! Port abstraction for prediction persistence.

use async_trait::async_trait;

use crate::domain::{NewPrediction, Prediction, PredictionFilter, PredictionId};

use super::{define_port_error, map_port_error};

define_port_error! {
    /// Errors raised by prediction repository adapters.
    pub enum PredictionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "prediction repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "prediction repository query failed: {message}",
    }
}

map_port_error!(PredictionRepositoryError, "prediction repository");

/// Persistence for predictions, including their verification fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionRepository: Send + Sync {
    /// Insert a prediction and return the stored row.
    async fn insert(&self, prediction: &NewPrediction)
    -> Result<Prediction, PredictionRepositoryError>;

    /// Fetch a prediction by id.
    async fn find(&self, id: PredictionId)
    -> Result<Option<Prediction>, PredictionRepositoryError>;

    /// Predictions matching `filter`, ordered by id.
    async fn list(
        &self,
        filter: &PredictionFilter,
    ) -> Result<Vec<Prediction>, PredictionRepositoryError>;

    /// Overwrite a stored prediction. Returns `false` when the row is gone.
    async fn update(&self, prediction: &Prediction) -> Result<bool, PredictionRepositoryError>;

    /// Delete a prediction. Returns `false` when the row is gone.
    async fn delete(&self, id: PredictionId) -> Result<bool, PredictionRepositoryError>;
}

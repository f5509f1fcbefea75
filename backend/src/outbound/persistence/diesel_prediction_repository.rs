//! PostgreSQL-backed `PredictionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PredictionRepository, PredictionRepositoryError};
use crate::domain::{NewPrediction, Prediction, PredictionFilter, PredictionId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPredictionRow, PredictionChanges, PredictionRow};
use super::pool::{DbPool, PoolError};
use super::schema::predictions;

/// Diesel-backed prediction store.
#[derive(Clone)]
pub struct DieselPredictionRepository {
    pool: DbPool,
}

impl DieselPredictionRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PredictionRepositoryError {
    map_pool_error(error, PredictionRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PredictionRepositoryError {
    map_diesel_error(
        error,
        PredictionRepositoryError::query,
        PredictionRepositoryError::connection,
    )
}

#[async_trait]
impl PredictionRepository for DieselPredictionRepository {
    async fn insert(
        &self,
        prediction: &NewPrediction,
    ) -> Result<Prediction, PredictionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(predictions::table)
            .values(NewPredictionRow::from(prediction))
            .returning(PredictionRow::as_returning())
            .get_result::<PredictionRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn find(
        &self,
        id: PredictionId,
    ) -> Result<Option<Prediction>, PredictionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = predictions::table
            .find(id.get())
            .select(PredictionRow::as_select())
            .first::<PredictionRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Prediction::from))
    }

    async fn list(
        &self,
        filter: &PredictionFilter,
    ) -> Result<Vec<Prediction>, PredictionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = predictions::table
            .select(PredictionRow::as_select())
            .order(predictions::id.asc())
            .into_boxed();
        if let Some(content) = filter.capsule_content {
            query = query.filter(predictions::capsule_content_id.eq(content.get()));
        }
        if let Some(status) = filter.verification_status {
            query = query.filter(predictions::verification_status_id.eq(status.get()));
        }
        if let Some(category) = filter.category.as_deref() {
            query = query.filter(predictions::category.eq(category));
        }
        if let Some(verifier) = filter.verified_by {
            query = query.filter(predictions::verification_user_id.eq(verifier.get()));
        }
        let rows = query
            .load::<PredictionRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Prediction::from).collect())
    }

    async fn update(&self, prediction: &Prediction) -> Result<bool, PredictionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(predictions::table.find(prediction.id.get()))
            .set(PredictionChanges::from(prediction))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: PredictionId) -> Result<bool, PredictionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(predictions::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

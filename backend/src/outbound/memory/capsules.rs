//! Capsule, content, and prediction ports over the in-memory tables.

use std::cmp::Reverse;

use async_trait::async_trait;

use crate::domain::ports::{
    CapsuleContentRepository, CapsuleRepository, CapsuleRepositoryError, PredictionRepository,
    PredictionRepositoryError,
};
use crate::domain::{
    CapsuleContent, CapsuleContentFilter, CapsuleContentId, CapsuleId, NewCapsule,
    NewCapsuleContent, NewPrediction, Prediction, PredictionFilter, PredictionId, ProfileId,
    TimeCapsule,
};

use super::InMemoryStore;

#[async_trait]
impl CapsuleRepository for InMemoryStore {
    async fn insert(&self, capsule: &NewCapsule) -> Result<TimeCapsule, CapsuleRepositoryError> {
        let mut tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables
            .capsules
            .insert_with(|id| capsule.clone().into_capsule(CapsuleId::new(id))))
    }

    async fn find(&self, id: CapsuleId) -> Result<Option<TimeCapsule>, CapsuleRepositoryError> {
        let tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.capsules.get(id.get()).cloned())
    }

    async fn list(&self) -> Result<Vec<TimeCapsule>, CapsuleRepositoryError> {
        let tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.capsules.select(|_| true))
    }

    async fn list_by_creator(
        &self,
        creator: ProfileId,
    ) -> Result<Vec<TimeCapsule>, CapsuleRepositoryError> {
        let tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        let mut rows = tables.capsules.select(|capsule| capsule.creator == creator);
        rows.sort_by_key(|capsule| Reverse((capsule.created_at, capsule.id)));
        Ok(rows)
    }

    async fn update(&self, capsule: &TimeCapsule) -> Result<bool, CapsuleRepositoryError> {
        let mut tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.capsules.replace(capsule.id.get(), capsule.clone()))
    }

    async fn delete(&self, id: CapsuleId) -> Result<bool, CapsuleRepositoryError> {
        let mut tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.delete_capsule(id))
    }
}

#[async_trait]
impl CapsuleContentRepository for InMemoryStore {
    async fn insert(
        &self,
        content: &NewCapsuleContent,
    ) -> Result<CapsuleContent, CapsuleRepositoryError> {
        let mut tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables
            .contents
            .insert_with(|id| content.clone().into_content(CapsuleContentId::new(id))))
    }

    async fn find(
        &self,
        id: CapsuleContentId,
    ) -> Result<Option<CapsuleContent>, CapsuleRepositoryError> {
        let tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.contents.get(id.get()).cloned())
    }

    async fn list(
        &self,
        filter: &CapsuleContentFilter,
    ) -> Result<Vec<CapsuleContent>, CapsuleRepositoryError> {
        let tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.contents.select(|content| filter.matches(content)))
    }

    async fn update(&self, content: &CapsuleContent) -> Result<bool, CapsuleRepositoryError> {
        let mut tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.contents.replace(content.id.get(), content.clone()))
    }

    async fn delete(&self, id: CapsuleContentId) -> Result<bool, CapsuleRepositoryError> {
        let mut tables = self.lock().map_err(CapsuleRepositoryError::query)?;
        Ok(tables.delete_content(id))
    }
}

#[async_trait]
impl PredictionRepository for InMemoryStore {
    async fn insert(
        &self,
        prediction: &NewPrediction,
    ) -> Result<Prediction, PredictionRepositoryError> {
        let mut tables = self.lock().map_err(PredictionRepositoryError::query)?;
        Ok(tables
            .predictions
            .insert_with(|id| prediction.clone().into_prediction(PredictionId::new(id))))
    }

    async fn find(
        &self,
        id: PredictionId,
    ) -> Result<Option<Prediction>, PredictionRepositoryError> {
        let tables = self.lock().map_err(PredictionRepositoryError::query)?;
        Ok(tables.predictions.get(id.get()).cloned())
    }

    async fn list(
        &self,
        filter: &PredictionFilter,
    ) -> Result<Vec<Prediction>, PredictionRepositoryError> {
        let tables = self.lock().map_err(PredictionRepositoryError::query)?;
        Ok(tables
            .predictions
            .select(|prediction| filter.matches(prediction)))
    }

    async fn update(&self, prediction: &Prediction) -> Result<bool, PredictionRepositoryError> {
        let mut tables = self.lock().map_err(PredictionRepositoryError::query)?;
        Ok(tables
            .predictions
            .replace(prediction.id.get(), prediction.clone()))
    }

    async fn delete(&self, id: PredictionId) -> Result<bool, PredictionRepositoryError> {
        let mut tables = self.lock().map_err(PredictionRepositoryError::query)?;
        Ok(tables.predictions.remove(id.get()).is_some())
    }
}

//! PostgreSQL-backed capsule and capsule content repositories.
//!
//! Deletes rely on the schema's `ON DELETE CASCADE` clauses to remove
//! dependent content, predictions, story nodes, and discussions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    CapsuleContentRepository, CapsuleRepository, CapsuleRepositoryError,
};
use crate::domain::{
    CapsuleContent, CapsuleContentFilter, CapsuleContentId, CapsuleId, NewCapsule,
    NewCapsuleContent, ProfileId, TimeCapsule,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    CapsuleChanges, CapsuleRow, ContentChanges, ContentRow, NewCapsuleRow, NewContentRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{capsule_contents, time_capsules};

/// Diesel-backed capsule store.
#[derive(Clone)]
pub struct DieselCapsuleRepository {
    pool: DbPool,
}

impl DieselCapsuleRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Diesel-backed capsule content store.
#[derive(Clone)]
pub struct DieselCapsuleContentRepository {
    pool: DbPool,
}

impl DieselCapsuleContentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CapsuleRepositoryError {
    map_pool_error(error, CapsuleRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CapsuleRepositoryError {
    map_diesel_error(
        error,
        CapsuleRepositoryError::query,
        CapsuleRepositoryError::connection,
    )
}

#[async_trait]
impl CapsuleRepository for DieselCapsuleRepository {
    async fn insert(&self, capsule: &NewCapsule) -> Result<TimeCapsule, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(time_capsules::table)
            .values(NewCapsuleRow::from(capsule))
            .returning(CapsuleRow::as_returning())
            .get_result::<CapsuleRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn find(&self, id: CapsuleId) -> Result<Option<TimeCapsule>, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = time_capsules::table
            .find(id.get())
            .select(CapsuleRow::as_select())
            .first::<CapsuleRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(TimeCapsule::from))
    }

    async fn list(&self) -> Result<Vec<TimeCapsule>, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = time_capsules::table
            .select(CapsuleRow::as_select())
            .order(time_capsules::id.asc())
            .load::<CapsuleRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(TimeCapsule::from).collect())
    }

    async fn list_by_creator(
        &self,
        creator: ProfileId,
    ) -> Result<Vec<TimeCapsule>, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = time_capsules::table
            .filter(time_capsules::creator_id.eq(creator.get()))
            .select(CapsuleRow::as_select())
            .order((time_capsules::created_at.desc(), time_capsules::id.desc()))
            .load::<CapsuleRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(TimeCapsule::from).collect())
    }

    async fn update(&self, capsule: &TimeCapsule) -> Result<bool, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(time_capsules::table.find(capsule.id.get()))
            .set(CapsuleChanges::from(capsule))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: CapsuleId) -> Result<bool, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(time_capsules::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl CapsuleContentRepository for DieselCapsuleContentRepository {
    async fn insert(
        &self,
        content: &NewCapsuleContent,
    ) -> Result<CapsuleContent, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(capsule_contents::table)
            .values(NewContentRow::from(content))
            .returning(ContentRow::as_returning())
            .get_result::<ContentRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn find(
        &self,
        id: CapsuleContentId,
    ) -> Result<Option<CapsuleContent>, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = capsule_contents::table
            .find(id.get())
            .select(ContentRow::as_select())
            .first::<ContentRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(CapsuleContent::from))
    }

    async fn list(
        &self,
        filter: &CapsuleContentFilter,
    ) -> Result<Vec<CapsuleContent>, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = capsule_contents::table
            .select(ContentRow::as_select())
            .order(capsule_contents::id.asc())
            .into_boxed();
        if let Some(capsule) = filter.capsule {
            query = query.filter(capsule_contents::capsule_id.eq(capsule.get()));
        }
        if let Some(content_type) = filter.content_type {
            query = query.filter(capsule_contents::content_type_id.eq(content_type.get()));
        }
        let rows = query
            .load::<ContentRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(CapsuleContent::from).collect())
    }

    async fn update(&self, content: &CapsuleContent) -> Result<bool, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(capsule_contents::table.find(content.id.get()))
            .set(ContentChanges::from(content))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: CapsuleContentId) -> Result<bool, CapsuleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(capsule_contents::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

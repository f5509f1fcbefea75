//! PostgreSQL-backed story node and choice repositories.
//!
//! Deleting a node cascades to its descendants and to every choice that
//! starts or ends at a removed node.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoryChoiceRepository, StoryNodeRepository, StoryRepositoryError};
use crate::domain::{
    NewStoryChoice, NewStoryNode, StoryChoice, StoryChoiceFilter, StoryChoiceId, StoryNode,
    StoryNodeFilter, StoryNodeId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    NewStoryChoiceRow, NewStoryNodeRow, StoryChoiceChanges, StoryChoiceRow, StoryNodeChanges,
    StoryNodeRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{story_choices, story_nodes};

/// Diesel-backed story node store.
#[derive(Clone)]
pub struct DieselStoryNodeRepository {
    pool: DbPool,
}

impl DieselStoryNodeRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Diesel-backed story choice store.
#[derive(Clone)]
pub struct DieselStoryChoiceRepository {
    pool: DbPool,
}

impl DieselStoryChoiceRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> StoryRepositoryError {
    map_pool_error(error, StoryRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> StoryRepositoryError {
    map_diesel_error(
        error,
        StoryRepositoryError::query,
        StoryRepositoryError::connection,
    )
}

#[async_trait]
impl StoryNodeRepository for DieselStoryNodeRepository {
    async fn insert(&self, node: &NewStoryNode) -> Result<StoryNode, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(story_nodes::table)
            .values(NewStoryNodeRow::from(node))
            .returning(StoryNodeRow::as_returning())
            .get_result::<StoryNodeRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn find(&self, id: StoryNodeId) -> Result<Option<StoryNode>, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = story_nodes::table
            .find(id.get())
            .select(StoryNodeRow::as_select())
            .first::<StoryNodeRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(StoryNode::from))
    }

    async fn list(&self, filter: &StoryNodeFilter) -> Result<Vec<StoryNode>, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = story_nodes::table
            .select(StoryNodeRow::as_select())
            .order(story_nodes::id.asc())
            .into_boxed();
        if let Some(content) = filter.capsule_content {
            query = query.filter(story_nodes::capsule_content_id.eq(content.get()));
        }
        if let Some(parent) = filter.parent_node {
            query = query.filter(story_nodes::parent_node_id.eq(parent.get()));
        }
        if filter.roots_only {
            query = query.filter(story_nodes::parent_node_id.is_null());
        }
        let rows = query
            .load::<StoryNodeRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(StoryNode::from).collect())
    }

    async fn update(&self, node: &StoryNode) -> Result<bool, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(story_nodes::table.find(node.id.get()))
            .set(StoryNodeChanges::from(node))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: StoryNodeId) -> Result<bool, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(story_nodes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl StoryChoiceRepository for DieselStoryChoiceRepository {
    async fn insert(&self, choice: &NewStoryChoice) -> Result<StoryChoice, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(story_choices::table)
            .values(NewStoryChoiceRow::from(choice))
            .returning(StoryChoiceRow::as_returning())
            .get_result::<StoryChoiceRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn find(&self, id: StoryChoiceId) -> Result<Option<StoryChoice>, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = story_choices::table
            .find(id.get())
            .select(StoryChoiceRow::as_select())
            .first::<StoryChoiceRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(StoryChoice::from))
    }

    async fn list(
        &self,
        filter: &StoryChoiceFilter,
    ) -> Result<Vec<StoryChoice>, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = story_choices::table
            .select(StoryChoiceRow::as_select())
            .order(story_choices::id.asc())
            .into_boxed();
        if let Some(node) = filter.node {
            query = query.filter(story_choices::node_id.eq(node.get()));
        }
        if let Some(next_node) = filter.next_node {
            query = query.filter(story_choices::next_node_id.eq(next_node.get()));
        }
        let rows = query
            .load::<StoryChoiceRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(StoryChoice::from).collect())
    }

    async fn update(&self, choice: &StoryChoice) -> Result<bool, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(story_choices::table.find(choice.id.get()))
            .set(StoryChoiceChanges::from(choice))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: StoryChoiceId) -> Result<bool, StoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(story_choices::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

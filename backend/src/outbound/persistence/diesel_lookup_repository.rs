//! PostgreSQL-backed `LookupRepository` over the five lookup tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LookupRepository, LookupRepositoryError};
use crate::domain::{Lookup, LookupId, LookupKind};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};

/// Diesel-backed lookup table reader.
#[derive(Clone)]
pub struct DieselLookupRepository {
    pool: DbPool,
}

impl DieselLookupRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> LookupRepositoryError {
    map_pool_error(error, LookupRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> LookupRepositoryError {
    map_diesel_error(
        error,
        LookupRepositoryError::query,
        LookupRepositoryError::connection,
    )
}

fn into_lookup((id, name): (i64, String)) -> Lookup {
    Lookup::new(LookupId::new(id), name)
}

/// Expand `$body` once per lookup table with `$table` naming its schema module.
macro_rules! with_lookup_table {
    ($kind:expr, $table:ident => $body:expr) => {
        match $kind {
            LookupKind::CapsuleStatus => {
                use super::schema::capsule_statuses as $table;
                $body
            }
            LookupKind::CapsuleType => {
                use super::schema::capsule_types as $table;
                $body
            }
            LookupKind::VerificationStatus => {
                use super::schema::verification_statuses as $table;
                $body
            }
            LookupKind::ContentType => {
                use super::schema::content_types as $table;
                $body
            }
            LookupKind::PermissionLevel => {
                use super::schema::permission_levels as $table;
                $body
            }
        }
    };
}

#[async_trait]
impl LookupRepository for DieselLookupRepository {
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, LookupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<(i64, String)> = with_lookup_table!(kind, t => {
            t::table
                .select((t::id, t::name))
                .order(t::id.asc())
                .load(&mut conn)
                .await
        })
        .map_err(diesel_error)?;
        Ok(rows.into_iter().map(into_lookup).collect())
    }

    async fn find(
        &self,
        kind: LookupKind,
        id: LookupId,
    ) -> Result<Option<Lookup>, LookupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<(i64, String)> = with_lookup_table!(kind, t => {
            t::table
                .find(id.get())
                .select((t::id, t::name))
                .first(&mut conn)
                .await
                .optional()
        })
        .map_err(diesel_error)?;
        Ok(row.map(into_lookup))
    }

    async fn find_by_name(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<Lookup>, LookupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<(i64, String)> = with_lookup_table!(kind, t => {
            t::table
                .filter(t::name.eq(name))
                .select((t::id, t::name))
                .order(t::id.asc())
                .first(&mut conn)
                .await
                .optional()
        })
        .map_err(diesel_error)?;
        Ok(row.map(into_lookup))
    }
}

//! PostgreSQL-backed `AccountRepository` for accounts, profiles, and tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    AccountId, AuthToken, NewAccount, ProfileId, StoredCredentials, UserProfile,
};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{CredentialsRow, NewAccountRow, NewProfileRow, NewTokenRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, auth_tokens, user_profiles};

/// Diesel-backed account store.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AccountRepositoryError {
    map_pool_error(error, AccountRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create_account(
        &self,
        account: &NewAccount,
    ) -> Result<UserProfile, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let result = conn
            .transaction(|conn| {
                async move {
                    let account_id: i64 = diesel::insert_into(accounts::table)
                        .values(NewAccountRow {
                            username: &account.username,
                            password_hash: &account.password_hash,
                            created_at: account.created_at,
                        })
                        .returning(accounts::id)
                        .get_result(conn)
                        .await?;
                    diesel::insert_into(user_profiles::table)
                        .values(NewProfileRow {
                            account_id,
                            bio: &account.bio,
                            location_x: account.location_x,
                            location_y: account.location_y,
                        })
                        .returning(ProfileRow::as_returning())
                        .get_result::<ProfileRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(err) if is_unique_violation(&err) => Err(
                AccountRepositoryError::duplicate_username(account.username.as_str()),
            ),
            Err(err) => Err(diesel_error(err)),
        }
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = accounts::table
            .filter(accounts::username.eq(username))
            .select(CredentialsRow::as_select())
            .first::<CredentialsRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(|row| StoredCredentials {
            account_id: AccountId::new(row.id),
            password_hash: row.password_hash,
        }))
    }

    async fn issue_token(
        &self,
        account_id: AccountId,
        candidate: &AuthToken,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthToken, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(auth_tokens::table)
            .values(NewTokenRow {
                key: candidate.as_str(),
                account_id: account_id.get(),
                created_at: issued_at,
            })
            .on_conflict(auth_tokens::account_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        let key: String = auth_tokens::table
            .filter(auth_tokens::account_id.eq(account_id.get()))
            .select(auth_tokens::key)
            .first(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(AuthToken::new(key))
    }

    async fn find_profile_by_token(
        &self,
        token: &AuthToken,
    ) -> Result<Option<UserProfile>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = auth_tokens::table
            .inner_join(accounts::table.inner_join(user_profiles::table))
            .filter(auth_tokens::key.eq(token.as_str()))
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(UserProfile::from))
    }

    async fn find_profile(
        &self,
        id: ProfileId,
    ) -> Result<Option<UserProfile>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = user_profiles::table
            .find(id.get())
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(UserProfile::from))
    }
}

//! Lookup and account ports over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, LookupRepository, LookupRepositoryError,
};
use crate::domain::{
    AccountId, AuthToken, Lookup, LookupId, LookupKind, NewAccount, ProfileId, StoredCredentials,
    UserProfile,
};

use super::{AccountRow, InMemoryStore};

#[async_trait]
impl LookupRepository for InMemoryStore {
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, LookupRepositoryError> {
        let tables = self.lock().map_err(LookupRepositoryError::query)?;
        Ok(tables
            .lookup_table(kind)
            .map(|table| table.select(|_| true))
            .unwrap_or_default())
    }

    async fn find(
        &self,
        kind: LookupKind,
        id: LookupId,
    ) -> Result<Option<Lookup>, LookupRepositoryError> {
        let tables = self.lock().map_err(LookupRepositoryError::query)?;
        Ok(tables
            .lookup_table(kind)
            .and_then(|table| table.get(id.get()))
            .cloned())
    }

    async fn find_by_name(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<Lookup>, LookupRepositoryError> {
        let tables = self.lock().map_err(LookupRepositoryError::query)?;
        Ok(tables
            .lookup_table(kind)
            .and_then(|table| table.values().find(|row| row.name == name))
            .cloned())
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create_account(
        &self,
        account: &NewAccount,
    ) -> Result<UserProfile, AccountRepositoryError> {
        let mut tables = self.lock().map_err(AccountRepositoryError::query)?;
        if tables
            .accounts
            .values()
            .any(|row| row.username == account.username)
        {
            return Err(AccountRepositoryError::duplicate_username(
                account.username.as_str(),
            ));
        }
        let stored = tables.accounts.insert_with(|id| AccountRow {
            id: AccountId::new(id),
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
        });
        Ok(tables.profiles.insert_with(|id| UserProfile {
            id: ProfileId::new(id),
            account_id: stored.id,
            bio: account.bio.clone(),
            location_x: account.location_x,
            location_y: account.location_y,
        }))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        let tables = self.lock().map_err(AccountRepositoryError::query)?;
        Ok(tables
            .accounts
            .values()
            .find(|row| row.username == username)
            .map(|row| StoredCredentials {
                account_id: row.id,
                password_hash: row.password_hash.clone(),
            }))
    }

    async fn issue_token(
        &self,
        account_id: AccountId,
        candidate: &AuthToken,
        _issued_at: DateTime<Utc>,
    ) -> Result<AuthToken, AccountRepositoryError> {
        let mut tables = self.lock().map_err(AccountRepositoryError::query)?;
        Ok(tables
            .tokens
            .entry(account_id)
            .or_insert_with(|| candidate.clone())
            .clone())
    }

    async fn find_profile_by_token(
        &self,
        token: &AuthToken,
    ) -> Result<Option<UserProfile>, AccountRepositoryError> {
        let tables = self.lock().map_err(AccountRepositoryError::query)?;
        let Some(account_id) = tables
            .tokens
            .iter()
            .find(|(_, stored)| *stored == token)
            .map(|(account_id, _)| *account_id)
        else {
            return Ok(None);
        };
        Ok(tables
            .profiles
            .values()
            .find(|profile| profile.account_id == account_id)
            .cloned())
    }

    async fn find_profile(
        &self,
        id: ProfileId,
    ) -> Result<Option<UserProfile>, AccountRepositoryError> {
        let tables = self.lock().map_err(AccountRepositoryError::query)?;
        Ok(tables.profiles.get(id.get()).cloned())
    }
}

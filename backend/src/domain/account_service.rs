//! Account registration, login, and token resolution.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{AccountRepository, AccountService};
use crate::domain::{
    AuthToken, Error, LoginCredentials, NewAccount, Registration, UserProfile, hash_password,
    verify_password,
};

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Account service implementing [`AccountService`].
#[derive(Clone)]
pub struct Accounts {
    accounts: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
}

impl Accounts {
    /// Create the service over the account repository and clock.
    pub fn new(accounts: Arc<dyn AccountRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { accounts, clock }
    }
}

#[async_trait]
impl AccountService for Accounts {
    async fn register(&self, registration: Registration) -> Result<AuthToken, Error> {
        let password_hash = hash_password(registration.credentials.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let now = self.clock.utc();
        let profile = self
            .accounts
            .create_account(&NewAccount {
                username: registration.credentials.username().to_owned(),
                password_hash,
                bio: registration.bio,
                location_x: registration.location_x,
                location_y: registration.location_y,
                created_at: now,
            })
            .await?;
        info!(profile_id = %profile.id, "registered account");
        Ok(self
            .accounts
            .issue_token(profile.account_id, &AuthToken::generate(), now)
            .await?)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthToken, Error> {
        let Some(stored) = self
            .accounts
            .find_credentials(credentials.username())
            .await?
        else {
            return Err(invalid_credentials());
        };
        let matches = verify_password(credentials.password(), &stored.password_hash)
            .map_err(|err| Error::internal(err.to_string()))?;
        if !matches {
            warn!(account_id = %stored.account_id, "rejected login");
            return Err(invalid_credentials());
        }
        Ok(self
            .accounts
            .issue_token(stored.account_id, &AuthToken::generate(), self.clock.utc())
            .await?)
    }

    async fn authenticate(&self, token: &AuthToken) -> Result<UserProfile, Error> {
        self.accounts
            .find_profile_by_token(token)
            .await?
            .ok_or_else(|| Error::unauthorized("invalid token"))
    }
}

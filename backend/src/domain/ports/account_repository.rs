//! Port abstraction for accounts, profiles, and auth tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    AccountId, AuthToken, Error, NewAccount, ProfileId, StoredCredentials, UserProfile,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}

impl From<AccountRepositoryError> for Error {
    fn from(error: AccountRepositoryError) -> Self {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::DuplicateUsername { .. } => {
                Error::conflict("A user with that username already exists")
            }
        }
    }
}

/// Persistence for login accounts and the profiles attached to them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create an account together with its profile.
    async fn create_account(
        &self,
        account: &NewAccount,
    ) -> Result<UserProfile, AccountRepositoryError>;

    /// Look up stored credentials by exact username.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError>;

    /// Store `candidate` as the account's token unless one already exists.
    ///
    /// Returns whichever token the account holds afterwards.
    async fn issue_token(
        &self,
        account_id: AccountId,
        candidate: &AuthToken,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthToken, AccountRepositoryError>;

    /// Resolve a presented token to the owning profile.
    async fn find_profile_by_token(
        &self,
        token: &AuthToken,
    ) -> Result<Option<UserProfile>, AccountRepositoryError>;

    /// Fetch a profile by id.
    async fn find_profile(
        &self,
        id: ProfileId,
    ) -> Result<Option<UserProfile>, AccountRepositoryError>;
}

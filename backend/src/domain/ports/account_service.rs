//! Driving port for registration, login, and token authentication.
//!
//! Inbound adapters call it to issue and resolve tokens without importing the
//! backing persistence.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials, Registration, UserProfile};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and profile, returning a fresh token.
    async fn register(&self, registration: Registration) -> Result<AuthToken, Error>;

    /// Check credentials and return the account's token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthToken, Error>;

    /// Resolve a presented token to the caller's profile.
    async fn authenticate(&self, token: &AuthToken) -> Result<UserProfile, Error>;
}

//! User profiles and the accounts behind them.

use chrono::{DateTime, Utc};

use super::{AccountId, ProfileId};

/// Public profile attached 1:1 to a login account.
///
/// Locations are raw coordinates; nothing validates their range.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Profile key.
    pub id: ProfileId,
    /// Owning account.
    pub account_id: AccountId,
    /// Free-form biography.
    pub bio: String,
    /// Horizontal coordinate.
    pub location_x: f64,
    /// Vertical coordinate.
    pub location_y: f64,
}

/// Insert payload for a new account and its profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// Unique login name.
    pub username: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    /// Initial biography.
    pub bio: String,
    /// Initial horizontal coordinate.
    pub location_x: f64,
    /// Initial vertical coordinate.
    pub location_y: f64,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Stored credential material for a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Account the hash belongs to.
    pub account_id: AccountId,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

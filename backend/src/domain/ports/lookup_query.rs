//! Driving port for the read-only lookup resources.

use async_trait::async_trait;

use crate::domain::{Error, Lookup, LookupId, LookupKind};

/// Domain use-case port for lookup tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupQuery: Send + Sync {
    /// Every row of `kind`, ordered by id.
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, Error>;

    /// Fetch one row of `kind`.
    async fn get(&self, kind: LookupKind, id: LookupId) -> Result<Lookup, Error>;
}

//! Port abstraction for the static lookup tables.

use async_trait::async_trait;

use crate::domain::{Lookup, LookupId, LookupKind};

use super::{define_port_error, map_port_error};

define_port_error! {
    /// Errors raised by lookup repository adapters.
    pub enum LookupRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "lookup repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "lookup repository query failed: {message}",
    }
}

map_port_error!(LookupRepositoryError, "lookup repository");

/// Read access to the lookup tables referenced by foreign key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupRepository: Send + Sync {
    /// Every row of `kind`, ordered by id.
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, LookupRepositoryError>;

    /// Fetch one row of `kind` by id.
    async fn find(
        &self,
        kind: LookupKind,
        id: LookupId,
    ) -> Result<Option<Lookup>, LookupRepositoryError>;

    /// Fetch the lowest-id row of `kind` with exactly `name`.
    async fn find_by_name(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<Lookup>, LookupRepositoryError>;
}

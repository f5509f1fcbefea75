//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use timecapsule::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_lookups: bool,
}

impl ServerConfig {
    /// Serve on `bind_addr` from a seeded in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            seed_lookups: true,
        }
    }

    /// Back every repository with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Whether the in-memory store starts with lookup rows.
    ///
    /// Ignored once a pool is attached; migrations seed the database.
    #[must_use]
    pub fn with_seed_lookups(mut self, seed_lookups: bool) -> Self {
        self.seed_lookups = seed_lookups;
        self
    }
}

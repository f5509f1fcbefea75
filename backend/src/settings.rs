//! Server settings loaded via OrthoConfig.
//!
//! Values come from `TIMECAPSULE_*` environment variables, a configuration
//! file, and command-line flags. Without a database URL the server runs on
//! the in-memory store.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Configuration values controlling the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TIMECAPSULE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; absent selects the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
    /// Seed lookup rows into the in-memory store; on unless set to `false`.
    pub seed_lookups: Option<bool>,
}

impl AppSettings {
    /// Address to bind, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns an error when the configured address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_min_idle(&self) -> u32 {
        self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    pub fn seed_lookups(&self) -> bool {
        self.seed_lookups.unwrap_or(true)
    }

    pub fn pool_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.pool_connection_timeout_secs
                .unwrap_or(DEFAULT_POOL_CONNECTION_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "TIMECAPSULE_BIND_ADDR",
        "TIMECAPSULE_DATABASE_URL",
        "TIMECAPSULE_POOL_MAX_SIZE",
        "TIMECAPSULE_POOL_MIN_IDLE",
        "TIMECAPSULE_POOL_CONNECTION_TIMEOUT_SECS",
        "TIMECAPSULE_RUN_MIGRATIONS",
        "TIMECAPSULE_SEED_LOOKUPS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("timecapsule")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.pool_max_size(), 10);
        assert_eq!(settings.pool_min_idle(), 2);
        assert_eq!(settings.pool_connection_timeout(), Duration::from_secs(30));
        assert!(settings.run_migrations());
        assert!(settings.seed_lookups());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TIMECAPSULE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "TIMECAPSULE_DATABASE_URL",
                Some("postgres://localhost/timecapsule".to_owned()),
            ),
            ("TIMECAPSULE_POOL_MAX_SIZE", Some("4".to_owned())),
            ("TIMECAPSULE_POOL_MIN_IDLE", Some("1".to_owned())),
            ("TIMECAPSULE_POOL_CONNECTION_TIMEOUT_SECS", Some("5".to_owned())),
            ("TIMECAPSULE_RUN_MIGRATIONS", Some("false".to_owned())),
            ("TIMECAPSULE_SEED_LOOKUPS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/timecapsule")
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert_eq!(settings.pool_min_idle(), 1);
        assert_eq!(settings.pool_connection_timeout(), Duration::from_secs(5));
        assert!(!settings.run_migrations());
        assert!(!settings.seed_lookups());
    }

    #[rstest]
    fn blank_database_url_selects_memory_store() {
        let _guard = lock_env([("TIMECAPSULE_DATABASE_URL", Some("   ".to_owned()))]);
        assert_eq!(load_from_empty_args().database_url(), None);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    fn lookup_seeding_defaults_on(#[case] value: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env([
            ("TIMECAPSULE_SEED_LOOKUPS", value.map(str::to_owned)),
            ("TIMECAPSULE_RUN_MIGRATIONS", value.map(str::to_owned)),
        ]);
        let settings = load_from_empty_args();
        assert_eq!(settings.seed_lookups(), expected);
        assert_eq!(settings.run_migrations(), expected);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([("TIMECAPSULE_BIND_ADDR", Some("not an address".to_owned()))]);
        assert!(load_from_empty_args().bind_addr().is_err());
    }
}

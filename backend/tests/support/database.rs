//! Shared setup for the Diesel repository suites.
//!
//! The suites run against the PostgreSQL named by
//! `TIMECAPSULE_TEST_DATABASE_URL`. Without it each test prints a skip marker
//! and returns. Every row a test writes hangs off a freshly registered
//! profile, so the suites can share one database and run in parallel.

#![allow(
    dead_code,
    reason = "each test binary uses a different subset of the helpers"
)]

use std::sync::OnceLock;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;

use timecapsule::domain::ports::{
    AccountRepository, CapsuleContentRepository, CapsuleRepository, LookupRepository,
};
use timecapsule::domain::{
    CapsuleContent, LookupId, LookupKind, NewAccount, NewCapsule, NewCapsuleContent,
    TimeCapsule, UserProfile,
};
use timecapsule::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselCapsuleContentRepository, DieselCapsuleRepository,
    DieselLookupRepository, PoolConfig, run_migrations,
};

/// Environment variable naming the database the suites write to.
pub const DATABASE_URL_ENV: &str = "TIMECAPSULE_TEST_DATABASE_URL";

/// A runtime and a pool connected to the migrated test database.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
}

static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

fn migrate_once(url: &str) -> Result<(), String> {
    MIGRATED
        .get_or_init(|| {
            let runtime = Runtime::new().map_err(|err| err.to_string())?;
            runtime
                .block_on(run_migrations(url))
                .map_err(|err| err.to_string())
        })
        .clone()
}

fn connect(url: &str) -> Result<TestDatabase, String> {
    migrate_once(url)?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let config = PoolConfig::new(url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(TestDatabase { runtime, pool })
}

/// Connect to the configured test database, or `None` when none is set.
///
/// A configured database that cannot be reached fails the test instead of
/// skipping it.
#[fixture]
pub fn database() -> Option<TestDatabase> {
    let url = std::env::var(DATABASE_URL_ENV).ok()?;
    match connect(&url) {
        Ok(db) => Some(db),
        Err(reason) => {
            panic!("Test database setup failed: {reason}. Unset {DATABASE_URL_ENV} to skip.")
        }
    }
}

/// Print the skip marker for `test`.
pub fn skip(test: &str) {
    eprintln!("SKIP-TEST-DATABASE: {test} skipped; set {DATABASE_URL_ENV} to run it");
}

/// A name no other test run will have picked.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Fixed instant `minutes` after the suites' epoch.
pub fn at(minutes: i64) -> DateTime<Utc> {
    let epoch = Utc
        .with_ymd_and_hms(2031, 1, 1, 0, 0, 0)
        .single()
        .expect("fixture epoch");
    epoch + Duration::minutes(minutes)
}

/// Register a fresh account and return its profile.
pub async fn seed_profile(pool: &DbPool) -> UserProfile {
    DieselAccountRepository::new(pool.clone())
        .create_account(&NewAccount {
            username: unique("user"),
            password_hash: "not-a-real-hash".to_owned(),
            bio: String::new(),
            location_x: 0.0,
            location_y: 0.0,
            created_at: at(0),
        })
        .await
        .expect("create account")
}

/// Id of the seeded lookup row of `kind` called `name`.
pub async fn lookup_id(pool: &DbPool, kind: LookupKind, name: &str) -> LookupId {
    DieselLookupRepository::new(pool.clone())
        .find_by_name(kind, name)
        .await
        .expect("lookup query")
        .unwrap_or_else(|| panic!("seeded {kind} '{name}'"))
        .id
}

/// Insert a draft personal capsule owned by `creator`.
pub async fn seed_capsule(
    pool: &DbPool,
    creator: &UserProfile,
    created_at: DateTime<Utc>,
) -> TimeCapsule {
    let status = lookup_id(pool, LookupKind::CapsuleStatus, "draft").await;
    let capsule_type = lookup_id(pool, LookupKind::CapsuleType, "personal").await;
    DieselCapsuleRepository::new(pool.clone())
        .insert(&NewCapsule {
            creator: creator.id,
            status,
            capsule_type,
            title: unique("capsule"),
            descriptions: "Letters for later".to_owned(),
            opening_date: at(60 * 24 * 365),
            location_x: 51.5,
            location_y: -0.12,
            created_at,
        })
        .await
        .expect("insert capsule")
}

/// Insert text content into `capsule`.
pub async fn seed_content(pool: &DbPool, capsule: &TimeCapsule) -> CapsuleContent {
    let content_type = lookup_id(pool, LookupKind::ContentType, "text").await;
    DieselCapsuleContentRepository::new(pool.clone())
        .insert(&NewCapsuleContent {
            capsule: capsule.id,
            content_type,
            content: "Dear future me".to_owned(),
            media_url: Some("https://example.test/letter.png".to_owned()),
            created_at: at(1),
        })
        .await
        .expect("insert content")
}

//! Backend entry-point: loads settings, wires the store, and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use timecapsule::AppSettings;
use timecapsule::inbound::http::health::HealthState;
use timecapsule::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, create_server};

async fn connect(settings: &AppSettings, database_url: &str) -> Result<DbPool> {
    if settings.run_migrations() {
        run_migrations(database_url)
            .await
            .wrap_err("apply database migrations")?;
        info!("database migrations applied");
    }
    let config = PoolConfig::new(database_url)
        .with_max_size(settings.pool_max_size())
        .with_min_idle(Some(settings.pool_min_idle()))
        .with_connection_timeout(settings.pool_connection_timeout());
    DbPool::new(config)
        .await
        .wrap_err("build database connection pool")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let bind_addr = settings.bind_addr().wrap_err("parse bind address")?;

    let mut config = ServerConfig::new(bind_addr).with_seed_lookups(settings.seed_lookups());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).wrap_err("start HTTP server")?;
    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("serve HTTP")
}

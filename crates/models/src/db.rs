use std::time::Duration;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{debug, info};

/// URL of a private, throwaway SQLite database.
pub const MEMORY_URL: &str = "sqlite::memory:";

/// Open a pooled connection using the pool settings from `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    if is_memory_url(&cfg.url) {
        // every pooled connection would open its own empty database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opt).await?;
    debug!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

/// Apply all pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migration::Migrator::up(db, None).await?;
    info!("database migrations applied");
    Ok(())
}

/// Fresh in-memory SQLite database with the schema applied.
pub async fn connect_memory() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::from_url(MEMORY_URL)).await?;
    migrate(&db).await?;
    Ok(db)
}

fn is_memory_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.starts_with("sqlite:") && lower.contains(":memory:")
}

use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::blog::SeaOrmBlogService;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Connect, migrate when enabled, and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;
    }

    let state = ServerState::new(SeaOrmBlogService::from_connection(db));
    Ok(routes::build_router(state, build_cors()))
}

/// Serve with an already loaded configuration until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting blog server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}

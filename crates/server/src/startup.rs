use std::{path::PathBuf, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::env::static_dir_present;
use service::auth::repo::SeaOrmAuthRepository;
use service::contacts::repo::SeaOrmContactRepository;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `.env` first, then `config.toml` (or `CONFIG_PATH`) and environment overrides.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

async fn static_dir(server: &ServerConfig) -> Option<PathBuf> {
    static_dir_present(&server.static_dir)
        .await
        .then(|| PathBuf::from(&server.static_dir))
}

/// Connect, migrate if configured, and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migration failed: {e}")))?;
        info!("database migrations applied");
    }

    let state = AppState::new(
        Arc::new(SeaOrmAuthRepository::new(db.clone())),
        Arc::new(SeaOrmContactRepository::new(db)),
        &cfg.auth,
    )
    .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    Ok(routes::build_router(state, build_cors(), static_dir(&cfg.server).await))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "agenda server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

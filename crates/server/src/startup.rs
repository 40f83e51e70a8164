use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{ApiConfig, AppConfig, StoreBackend, StoreConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{
    users::{
        repo::{FileUserStore, MemoryUserStore, SeaOrmUserStore},
        ErrorPolicy, UserHandlers, UserStore,
    },
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn error_policy(api: &ApiConfig) -> ErrorPolicy {
    ErrorPolicy {
        legacy_status_codes: api.legacy_status_codes,
        expose_error_detail: api.expose_error_detail,
    }
}

/// Construct the configured user store. Created once and shared by every request.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn UserStore>, StartupError> {
    let StoreConfig { backend, path } = &cfg.store;
    let store: Arc<dyn UserStore> = match backend {
        StoreBackend::Memory => {
            info!(backend = "memory", "user store ready; records are lost on exit");
            Arc::new(MemoryUserStore::new())
        }
        StoreBackend::File => {
            common::env::ensure_parent_dir(path).await?;
            let store = FileUserStore::open(path.as_str())
                .await
                .map_err(|e| StartupError::Store(e.to_string()))?;
            info!(backend = "file", %path, "user store ready");
            Arc::new(store)
        }
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Store(format!("migrate users table: {e}")))?;
            info!(backend = "postgres", "user store ready");
            Arc::new(SeaOrmUserStore::new(db))
        }
    };
    Ok(store)
}

/// Assemble the application for a validated configuration.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let store = build_store(cfg).await?;
    let users = UserHandlers::new(store).with_policy(error_policy(&cfg.api));
    Ok(routes::build_router(AppState { users }, build_cors()))
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, backend = ?cfg.store.backend, legacy_status_codes = cfg.api.legacy_status_codes, "starting users api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("users api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use chrono::Utc;
use configs::{AppConfig, StorageBackend, StorageConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{records::seed_records, runtime, FileRecordStore, MemoryRecordStore, RecordService, RecordStore};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured store.
pub async fn open_store(storage: &StorageConfig) -> Result<Arc<dyn RecordStore>, StartupError> {
    let store: Arc<dyn RecordStore> = match storage.backend {
        StorageBackend::Memory => Arc::new(MemoryRecordStore::new()),
        StorageBackend::File => {
            runtime::ensure_env(&storage.path).await.map_err(|e| StartupError::Runtime(e.to_string()))?;
            let file: Arc<dyn RecordStore> = FileRecordStore::new(&storage.path).await?;
            file
        }
    };
    info!(backend = ?storage.backend, path = %storage.path.display(), "record store opened");
    Ok(store)
}

/// Store, record service and seed data, ready to hand to the router.
pub async fn build_state(config: &AppConfig) -> Result<ServerState, StartupError> {
    let records = RecordService::new(open_store(&config.storage).await?);
    if config.storage.seed_on_empty {
        records.seed_if_empty(seed_records(Utc::now())).await?;
    }
    Ok(ServerState::new(records))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server until `shutdown` resolves.
pub async fn run<F>(config: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let bind = config.server.bind_addr();
    let app = build_app(build_state(&config).await?);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {bind}: {e}")))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "starting server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, CacheStore, Database, IbgeClient};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    let addr = config.server_addr();

    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::Config(format!("Database connection failed: {}", e)))?;
    db.run_migrations()
        .await
        .map_err(|e| AppError::Config(format!("Migrations failed: {}", e)))?;
    let db = Arc::new(db);

    let cache = connect_cache(&config).await;
    let geo = Arc::new(IbgeClient::from_config(&config)?);

    let app_state = AppState::from_config(db, cache, geo, config);
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Redis is optional; an unreachable server only disables caching.
async fn connect_cache(config: &Config) -> Option<Arc<dyn CacheStore>> {
    let url = config.redis_url.as_deref()?;

    match Cache::connect(url).await {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            tracing::warn!(error = %e, "Redis unavailable, geographic data will not be cached");
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

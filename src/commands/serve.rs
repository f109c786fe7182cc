//! Serve command implementation

use crate::catalog::SqliteCatalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{build_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Initialize the catalog and run the HTTP server until Ctrl-C.
///
/// Any failure before the listener is bound (database, schema, seed, bind)
/// is returned so the process exits non-zero.
pub async fn cmd_serve(config: &Config) -> Result<()> {
    let catalog = SqliteCatalog::connect(config).await?;
    catalog.init_schema().await?;

    if config.seed.enabled {
        if catalog.seed_defaults().await? {
            info!("Seeded default catalog");
        }
    } else {
        info!("Default catalog seeding disabled");
    }

    let state = AppState::new(Arc::new(catalog.clone()));
    let app = build_router(state, config.server.max_body_bytes);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind {}: {}", addr, e)))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    catalog.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

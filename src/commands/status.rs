//! Status command implementation

use crate::catalog::{CatalogStats, CatalogStore, SqliteCatalog};
use crate::config::{database_url, Config};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub database_url: String,
    pub bind_addr: String,
    pub seed_enabled: bool,
    pub catalog: CatalogStats,
}

/// Get catalog status
pub async fn cmd_status(config: &Config, catalog: &SqliteCatalog) -> Result<StatusInfo> {
    info!("Getting status");

    let stats = catalog.stats().await?;

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        database_url: database_url(config),
        bind_addr: config.bind_addr(),
        seed_enabled: config.seed.enabled,
        catalog: stats,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\nsinistro-admin Status\n");
    println!("Configuration: {}", status.config_path);
    println!("Database: {}", status.database_url);
    println!("Listen address: {}", status.bind_addr);
    println!(
        "Seeding: {}",
        if status.seed_enabled { "enabled" } else { "disabled" }
    );
    println!("\nCatalog:");
    println!("  Clients: {}", status.catalog.clients);
    println!("  Client procedures: {}", status.catalog.client_procedures);
    println!("  Providers: {}", status.catalog.providers);
    println!("  Provider procedures: {}", status.catalog.provider_procedures);
    println!(
        "  Additional provider procedures: {}",
        status.catalog.additional_provider_procedures
    );
    println!("  Reference procedures: {}", status.catalog.sinistro_procedures);
}

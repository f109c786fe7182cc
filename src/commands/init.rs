//! Init command implementation

use crate::catalog::SqliteCatalog;
use crate::config::{database_url, Config};
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// What `init` produced
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub database_url: String,
    pub seeded: bool,
}

/// Write a default config file and create the catalog database.
///
/// An existing config file is only replaced when `force` is set. The schema
/// is created either way, and the default catalog is seeded into an empty
/// database unless seeding is disabled.
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<InitReport> {
    let mut config = Config::default();
    config.init_paths(base_dir);

    if config.paths.config_file.exists() && !force {
        return Err(Error::Config(format!(
            "Config file already exists at: {} (use --force to overwrite)",
            config.paths.config_file.display()
        )));
    }

    std::fs::create_dir_all(&config.paths.base_dir)?;
    config.save()?;

    let catalog = SqliteCatalog::connect(&config).await?;
    catalog.init_schema().await?;
    let seeded = config.seed.enabled && catalog.seed_defaults().await?;
    catalog.close().await;

    info!(
        config = %config.paths.config_file.display(),
        seeded,
        "Initialized sinistro-admin"
    );

    Ok(InitReport {
        config_path: config.paths.config_file.clone(),
        database_url: database_url(&config),
        seeded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_config_and_seeded_database() {
        let temp = TempDir::new().unwrap();
        let report = cmd_init(Some(temp.path().to_path_buf()), false)
            .await
            .unwrap();

        assert!(report.config_path.exists());
        assert!(report.seeded);
        assert!(temp.path().join("database.db").exists());

        let catalog = SqliteCatalog::open(&temp.path().join("database.db"))
            .await
            .unwrap();
        assert_eq!(catalog.stats().await.unwrap().clients, 3);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        cmd_init(Some(temp.path().to_path_buf()), false)
            .await
            .unwrap();

        let err = cmd_init(Some(temp.path().to_path_buf()), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // Forced re-init keeps existing data and does not seed twice
        let report = cmd_init(Some(temp.path().to_path_buf()), true)
            .await
            .unwrap();
        assert!(!report.seeded);
    }
}

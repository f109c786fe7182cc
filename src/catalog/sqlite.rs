//! SQLite-backed catalog

use super::seed::{CLIENTS, PROVIDERS, REFERENCE_PROCEDURES};
use super::{
    CatalogStats, CatalogStore, Checklist, ClaimType, Client, ClientProcedure, Provider,
    ProviderProcedure, ReferenceProcedure, SCHEMA_SQL,
};
use crate::config::{database_url, Config};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use tracing::{debug, info};

/// Catalog database handle
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Connect using the configured database URL
    pub async fn connect(config: &Config) -> Result<Self> {
        Self::connect_url(&database_url(config), config.database.max_connections).await
    }

    /// Connect to a sqlx SQLite URL (`sqlite://path/to/file.db`)
    pub async fn connect_url(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        // Create parent directory if needed
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Connecting to SQLite database at {:?}", options.get_filename());

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Open a database file directly and make sure the schema exists
    pub async fn open(db_path: &std::path::Path) -> Result<Self> {
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Self::connect_url(&url, 5).await?;
        db.init_schema().await?;
        Ok(db)
    }

    /// Create missing tables and indexes. Safe to run on every start.
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Load the built-in sample data into a fresh database.
    ///
    /// Seeding only happens while clients, providers and the reference
    /// catalog are all empty, so emptying one of them never re-seeds the
    /// others. Returns `true` when rows were inserted.
    pub async fn seed_defaults(&self) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM clients) \
                  + (SELECT COUNT(*) FROM providers) \
                  + (SELECT COUNT(*) FROM sinistro_procedures)",
        )
        .fetch_one(&mut *tx)
        .await?;
        if existing > 0 {
            debug!("Catalog already has {} rows, skipping seed", existing);
            return Ok(false);
        }

        for client in CLIENTS {
            let client_id = sqlx::query("INSERT INTO clients (name) VALUES (?)")
                .bind(client.name)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();

            for text in client.procedures {
                sqlx::query(
                    "INSERT INTO client_procedures (client_id, procedure_text) VALUES (?, ?)",
                )
                .bind(client_id)
                .bind(*text)
                .execute(&mut *tx)
                .await?;
            }
        }

        for provider in PROVIDERS {
            let provider_id = sqlx::query("INSERT INTO providers (name, image) VALUES (?, ?)")
                .bind(provider.name)
                .bind(provider.image)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();

            for (checklist, claim_type, texts) in provider.procedures {
                let sql = format!(
                    "INSERT INTO {} (provider_id, sinistro_type, procedure_text) VALUES (?, ?, ?)",
                    checklist.table()
                );
                for text in texts.iter() {
                    sqlx::query(&sql)
                        .bind(provider_id)
                        .bind(claim_type.tag())
                        .bind(*text)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        for (claim_type, texts) in REFERENCE_PROCEDURES {
            for text in texts.iter() {
                sqlx::query(
                    "INSERT INTO sinistro_procedures (sinistro_type, procedure_text) VALUES (?, ?)",
                )
                .bind(claim_type.tag())
                .bind(*text)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        info!(
            clients = CLIENTS.len(),
            providers = PROVIDERS.len(),
            "Seeded default catalog data"
        );
        Ok(true)
    }

    /// Close the pool, waiting for checked-out connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn count(&self, table: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    // ===== Clients =====

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>("SELECT id, name FROM clients ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    async fn get_client(&self, id: i64) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>("SELECT id, name FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn create_client(&self, name: &str) -> Result<i64> {
        let id = sqlx::query("INSERT INTO clients (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        debug!(client_id = id, "Created client");
        Ok(id)
    }

    async fn update_client(&self, id: i64, name: &str) -> Result<u64> {
        let changes = sqlx::query("UPDATE clients SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(changes)
    }

    async fn delete_client(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let procedures = sqlx::query("DELETE FROM client_procedures WHERE client_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let changes = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        debug!(client_id = id, procedures, "Deleted client");
        Ok(changes)
    }

    // ===== Client procedures =====

    async fn list_all_client_procedures(&self) -> Result<Vec<ClientProcedure>> {
        let procedures = sqlx::query_as::<_, ClientProcedure>(
            "SELECT id, client_id, procedure_text FROM client_procedures ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(procedures)
    }

    async fn list_client_procedures(&self, client_id: i64) -> Result<Vec<ClientProcedure>> {
        let procedures = sqlx::query_as::<_, ClientProcedure>(
            "SELECT id, client_id, procedure_text FROM client_procedures WHERE client_id = ? ORDER BY id",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(procedures)
    }

    async fn create_client_procedure(&self, client_id: i64, text: &str) -> Result<i64> {
        let id = sqlx::query(
            "INSERT INTO client_procedures (client_id, procedure_text) VALUES (?, ?)",
        )
        .bind(client_id)
        .bind(text)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    async fn update_client_procedure(&self, id: i64, client_id: i64, text: &str) -> Result<u64> {
        let changes = sqlx::query(
            "UPDATE client_procedures SET procedure_text = ? WHERE id = ? AND client_id = ?",
        )
        .bind(text)
        .bind(id)
        .bind(client_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(changes)
    }

    async fn delete_client_procedure(&self, id: i64, client_id: i64) -> Result<u64> {
        let changes = sqlx::query("DELETE FROM client_procedures WHERE id = ? AND client_id = ?")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(changes)
    }

    // ===== Providers =====

    async fn list_providers(&self) -> Result<Vec<Provider>> {
        let providers =
            sqlx::query_as::<_, Provider>("SELECT id, name, image FROM providers ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(providers)
    }

    async fn get_provider(&self, id: i64) -> Result<Option<Provider>> {
        let provider =
            sqlx::query_as::<_, Provider>("SELECT id, name, image FROM providers WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(provider)
    }

    async fn create_provider(&self, name: &str, image: &str) -> Result<i64> {
        let id = sqlx::query("INSERT INTO providers (name, image) VALUES (?, ?)")
            .bind(name)
            .bind(image)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        debug!(provider_id = id, "Created provider");
        Ok(id)
    }

    async fn update_provider(&self, id: i64, name: &str, image: &str) -> Result<u64> {
        let changes = sqlx::query("UPDATE providers SET name = ?, image = ? WHERE id = ?")
            .bind(name)
            .bind(image)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(changes)
    }

    async fn delete_provider(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        for checklist in Checklist::ALL {
            let removed = sqlx::query(&format!(
                "DELETE FROM {} WHERE provider_id = ?",
                checklist.table()
            ))
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
            debug!(provider_id = id, %checklist, removed, "Removed provider procedures");
        }

        let changes = sqlx::query("DELETE FROM providers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(changes)
    }

    // ===== Provider procedures =====

    async fn list_all_provider_procedures(
        &self,
        checklist: Checklist,
    ) -> Result<Vec<ProviderProcedure>> {
        let procedures = sqlx::query_as::<_, ProviderProcedure>(&format!(
            "SELECT id, provider_id, sinistro_type, procedure_text FROM {} ORDER BY id",
            checklist.table()
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(procedures)
    }

    async fn list_provider_procedures(
        &self,
        checklist: Checklist,
        provider_id: i64,
        claim_type: ClaimType,
    ) -> Result<Vec<ProviderProcedure>> {
        let procedures = sqlx::query_as::<_, ProviderProcedure>(&format!(
            "SELECT id, provider_id, sinistro_type, procedure_text FROM {} \
             WHERE provider_id = ? AND sinistro_type = ? ORDER BY id",
            checklist.table()
        ))
        .bind(provider_id)
        .bind(claim_type.tag())
        .fetch_all(&self.pool)
        .await?;
        Ok(procedures)
    }

    async fn create_provider_procedure(
        &self,
        checklist: Checklist,
        provider_id: i64,
        claim_type: ClaimType,
        text: &str,
    ) -> Result<i64> {
        let id = sqlx::query(&format!(
            "INSERT INTO {} (provider_id, sinistro_type, procedure_text) VALUES (?, ?, ?)",
            checklist.table()
        ))
        .bind(provider_id)
        .bind(claim_type.tag())
        .bind(text)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    async fn update_provider_procedure(
        &self,
        checklist: Checklist,
        id: i64,
        provider_id: i64,
        text: &str,
    ) -> Result<u64> {
        let changes = sqlx::query(&format!(
            "UPDATE {} SET procedure_text = ? WHERE id = ? AND provider_id = ?",
            checklist.table()
        ))
        .bind(text)
        .bind(id)
        .bind(provider_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(changes)
    }

    async fn delete_provider_procedure(
        &self,
        checklist: Checklist,
        id: i64,
        provider_id: i64,
    ) -> Result<u64> {
        let changes = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = ? AND provider_id = ?",
            checklist.table()
        ))
        .bind(id)
        .bind(provider_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(changes)
    }

    // ===== Reference procedures =====

    async fn list_reference_procedures(
        &self,
        claim_type: Option<ClaimType>,
    ) -> Result<Vec<ReferenceProcedure>> {
        let procedures = match claim_type {
            Some(claim_type) => {
                sqlx::query_as::<_, ReferenceProcedure>(
                    "SELECT id, sinistro_type, procedure_text FROM sinistro_procedures \
                     WHERE sinistro_type = ? ORDER BY id",
                )
                .bind(claim_type.tag())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ReferenceProcedure>(
                    "SELECT id, sinistro_type, procedure_text FROM sinistro_procedures ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(procedures)
    }

    // ===== Maintenance =====

    async fn stats(&self) -> Result<CatalogStats> {
        Ok(CatalogStats {
            clients: self.count("clients").await?,
            client_procedures: self.count("client_procedures").await?,
            providers: self.count("providers").await?,
            provider_procedures: self.count(Checklist::Primary.table()).await?,
            additional_provider_procedures: self.count(Checklist::Additional.table()).await?,
            sinistro_procedures: self.count("sinistro_procedures").await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    async fn setup_test_db() -> (SqliteCatalog, TempDir) {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));

        let db = SqliteCatalog::connect(&config).await.unwrap();
        db.init_schema().await.unwrap();
        (db, tmp)
    }

    fn texts(rows: &[ClientProcedure]) -> Vec<&str> {
        rows.iter().map(|p| p.procedure_text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let (db, _tmp) = setup_test_db().await;
        db.init_schema().await.unwrap();
        assert_eq!(db.stats().await.unwrap(), CatalogStats::default());
    }

    #[tokio::test]
    async fn test_client_procedures_keep_creation_order() {
        let (db, _tmp) = setup_test_db().await;

        let client_id = db.create_client("Test").await.unwrap();
        for step in ["Step 1", "Step 2", "Step 3"] {
            db.create_client_procedure(client_id, step).await.unwrap();
        }

        let procedures = db.list_client_procedures(client_id).await.unwrap();
        assert_eq!(
            texts(&procedures),
            vec!["Step 1", "Step 2", "Step 3"]
        );
        assert!(procedures.iter().all(|p| p.client_id == client_id));
    }

    #[tokio::test]
    async fn test_unknown_parent_lists_empty() {
        let (db, _tmp) = setup_test_db().await;
        assert!(db.list_client_procedures(42).await.unwrap().is_empty());
        assert!(db
            .list_provider_procedures(Checklist::Primary, 42, ClaimType::Theft)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_are_scoped_to_parent() {
        let (db, _tmp) = setup_test_db().await;

        let a = db.create_client("A").await.unwrap();
        let b = db.create_client("B").await.unwrap();
        let proc_a = db.create_client_procedure(a, "owned by A").await.unwrap();

        assert_eq!(
            db.update_client_procedure(proc_a, b, "hijacked").await.unwrap(),
            0
        );
        assert_eq!(db.delete_client_procedure(proc_a, b).await.unwrap(), 0);

        let procedures = db.list_client_procedures(a).await.unwrap();
        assert_eq!(texts(&procedures), vec!["owned by A"]);

        assert_eq!(
            db.update_client_procedure(proc_a, a, "edited").await.unwrap(),
            1
        );
        assert_eq!(db.delete_client_procedure(proc_a, a).await.unwrap(), 1);
        assert!(db.list_client_procedures(a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_procedure_scoping() {
        let (db, _tmp) = setup_test_db().await;

        let p1 = db.create_provider("P1", "").await.unwrap();
        let p2 = db.create_provider("P2", "").await.unwrap();
        let id = db
            .create_provider_procedure(Checklist::Primary, p1, ClaimType::Theft, "Check records")
            .await
            .unwrap();

        assert_eq!(
            db.update_provider_procedure(Checklist::Primary, id, p2, "x")
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            db.delete_provider_procedure(Checklist::Primary, id, p2)
                .await
                .unwrap(),
            0
        );
        // Same id in the other checklist is a different row
        assert_eq!(
            db.delete_provider_procedure(Checklist::Additional, id, p1)
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            db.update_provider_procedure(Checklist::Primary, id, p1, "Check all records")
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_client_cascades() {
        let (db, _tmp) = setup_test_db().await;

        let client_id = db.create_client("Test").await.unwrap();
        db.create_client_procedure(client_id, "Step 1").await.unwrap();
        db.create_client_procedure(client_id, "Step 2").await.unwrap();

        let listed = db.list_client_procedures(client_id).await.unwrap();
        assert_eq!(
            texts(&listed),
            vec!["Step 1", "Step 2"]
        );

        assert_eq!(db.delete_client(client_id).await.unwrap(), 1);
        assert!(db.list_client_procedures(client_id).await.unwrap().is_empty());
        assert!(db.list_all_client_procedures().await.unwrap().is_empty());
        assert!(db.get_client(client_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_provider_cascades_both_checklists() {
        let (db, _tmp) = setup_test_db().await;

        let provider_id = db.create_provider("P1", "").await.unwrap();
        let other_id = db.create_provider("P2", "").await.unwrap();
        for checklist in Checklist::ALL {
            db.create_provider_procedure(checklist, provider_id, ClaimType::Accidents, "step")
                .await
                .unwrap();
            db.create_provider_procedure(checklist, other_id, ClaimType::Accidents, "keep")
                .await
                .unwrap();
        }

        assert_eq!(db.delete_provider(provider_id).await.unwrap(), 1);

        for checklist in Checklist::ALL {
            let remaining = db.list_all_provider_procedures(checklist).await.unwrap();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].provider_id, other_id);
        }
    }

    #[tokio::test]
    async fn test_create_under_missing_parent_is_constraint_violation() {
        let (db, _tmp) = setup_test_db().await;

        let err = db.create_client_procedure(999, "orphan").await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));

        let err = db
            .create_provider_procedure(Checklist::Additional, 999, ClaimType::Damages, "orphan")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.client_procedures, 0);
        assert_eq!(stats.additional_provider_procedures, 0);
    }

    #[tokio::test]
    async fn test_claim_type_partitioning() {
        let (db, _tmp) = setup_test_db().await;

        let provider_id = db.create_provider("P1", "").await.unwrap();
        db.create_provider_procedure(
            Checklist::Primary,
            provider_id,
            ClaimType::Theft,
            "Check records",
        )
        .await
        .unwrap();

        let damages = db
            .list_provider_procedures(Checklist::Primary, provider_id, ClaimType::Damages)
            .await
            .unwrap();
        assert!(damages.is_empty());

        let theft = db
            .list_provider_procedures(Checklist::Primary, provider_id, ClaimType::Theft)
            .await
            .unwrap();
        assert_eq!(theft.len(), 1);
        assert_eq!(theft[0].procedure_text, "Check records");
        assert_eq!(theft[0].claim_type().unwrap(), ClaimType::Theft);

        let additional = db
            .list_provider_procedures(Checklist::Additional, provider_id, ClaimType::Theft)
            .await
            .unwrap();
        assert!(additional.is_empty());
    }

    #[tokio::test]
    async fn test_update_provider_and_client() {
        let (db, _tmp) = setup_test_db().await;

        let provider_id = db.create_provider("Old", "").await.unwrap();
        assert_eq!(
            db.update_provider(provider_id, "New", "https://example.com/logo.png")
                .await
                .unwrap(),
            1
        );
        let provider = db.get_provider(provider_id).await.unwrap().unwrap();
        assert_eq!(provider.name, "New");
        assert_eq!(provider.image, "https://example.com/logo.png");
        assert_eq!(db.update_provider(provider_id + 1, "x", "").await.unwrap(), 0);

        let client_id = db.create_client("Old").await.unwrap();
        assert_eq!(db.update_client(client_id, "New").await.unwrap(), 1);
        assert_eq!(db.list_clients().await.unwrap()[0].name, "New");
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let (db, _tmp) = setup_test_db().await;

        assert!(db.seed_defaults().await.unwrap());
        let first = db.stats().await.unwrap();
        assert_eq!(first.clients, 3);
        assert_eq!(first.client_procedures, 13);
        assert_eq!(first.providers, 3);
        assert_eq!(first.provider_procedures, 36);
        assert_eq!(first.additional_provider_procedures, 6);
        assert_eq!(first.sinistro_procedures, 12);

        assert!(!db.seed_defaults().await.unwrap());
        assert_eq!(db.stats().await.unwrap(), first);

        let theft = db
            .list_reference_procedures(Some(ClaimType::Theft))
            .await
            .unwrap();
        assert_eq!(theft.len(), 3);
        assert_eq!(theft[0].procedure_text, "Registrar boletim de ocorrência");
    }

    #[tokio::test]
    async fn test_seed_skipped_after_all_clients_deleted() {
        let (db, _tmp) = setup_test_db().await;
        assert!(db.seed_defaults().await.unwrap());

        for client in db.list_clients().await.unwrap() {
            db.delete_client(client.id).await.unwrap();
        }

        assert!(!db.seed_defaults().await.unwrap());
        let stats = db.stats().await.unwrap();
        assert_eq!(stats.clients, 0);
        assert_eq!(stats.providers, 3);
        assert_eq!(stats.provider_procedures, 36);
        assert_eq!(stats.sinistro_procedures, 12);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let (db, _tmp) = setup_test_db().await;
        let client_id = db.create_client("Test").await.unwrap();
        db.create_client_procedure(client_id, "Step 1").await.unwrap();
        let last = db.create_client_procedure(client_id, "Step 2").await.unwrap();
        assert_eq!(db.delete_client_procedure(last, client_id).await.unwrap(), 1);

        let next = db.create_client_procedure(client_id, "Step 3").await.unwrap();
        assert!(next > last);

        let provider_id = db.create_provider("P", "").await.unwrap();
        db.delete_provider(provider_id).await.unwrap();
        assert!(db.create_provider("Q", "").await.unwrap() > provider_id);
    }

    #[tokio::test]
    async fn test_open_creates_schema() {
        let tmp = TempDir::new().unwrap();
        let db = SqliteCatalog::open(&tmp.path().join("nested").join("catalog.db"))
            .await
            .unwrap();
        assert!(db.list_clients().await.unwrap().is_empty());
        db.close().await;
    }
}

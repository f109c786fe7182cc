//! Procedure catalog storage
//!
//! This module owns everything persisted by sinistro-admin:
//! - Clients and their ordered checklists
//! - Providers with primary and additional checklists per claim type
//! - The reference catalog of procedures per claim type
//!
//! Route handlers only see the [`CatalogStore`] trait; [`SqliteCatalog`]
//! is the backing implementation.

mod models;
mod schema;
mod seed;
mod sqlite;

pub use models::*;
pub use schema::*;
pub use sqlite::SqliteCatalog;

use crate::error::Result;
use async_trait::async_trait;

/// Query/command contract over the catalog.
///
/// Every mutation of a procedure row is scoped by the row id *and* its
/// parent id: a matching id under a different parent changes nothing.
/// Counts returned by update/delete are the number of rows touched.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ===== Clients =====

    async fn list_clients(&self) -> Result<Vec<Client>>;

    async fn get_client(&self, id: i64) -> Result<Option<Client>>;

    async fn create_client(&self, name: &str) -> Result<i64>;

    async fn update_client(&self, id: i64, name: &str) -> Result<u64>;

    /// Delete a client together with its checklist, atomically
    async fn delete_client(&self, id: i64) -> Result<u64>;

    // ===== Client procedures =====

    async fn list_all_client_procedures(&self) -> Result<Vec<ClientProcedure>>;

    /// Steps of one client in insertion order; unknown clients yield an empty list
    async fn list_client_procedures(&self, client_id: i64) -> Result<Vec<ClientProcedure>>;

    async fn create_client_procedure(&self, client_id: i64, text: &str) -> Result<i64>;

    async fn update_client_procedure(&self, id: i64, client_id: i64, text: &str) -> Result<u64>;

    async fn delete_client_procedure(&self, id: i64, client_id: i64) -> Result<u64>;

    // ===== Providers =====

    async fn list_providers(&self) -> Result<Vec<Provider>>;

    async fn get_provider(&self, id: i64) -> Result<Option<Provider>>;

    async fn create_provider(&self, name: &str, image: &str) -> Result<i64>;

    async fn update_provider(&self, id: i64, name: &str, image: &str) -> Result<u64>;

    /// Delete a provider together with both of its checklists, atomically
    async fn delete_provider(&self, id: i64) -> Result<u64>;

    // ===== Provider procedures =====

    async fn list_all_provider_procedures(
        &self,
        checklist: Checklist,
    ) -> Result<Vec<ProviderProcedure>>;

    async fn list_provider_procedures(
        &self,
        checklist: Checklist,
        provider_id: i64,
        claim_type: ClaimType,
    ) -> Result<Vec<ProviderProcedure>>;

    async fn create_provider_procedure(
        &self,
        checklist: Checklist,
        provider_id: i64,
        claim_type: ClaimType,
        text: &str,
    ) -> Result<i64>;

    async fn update_provider_procedure(
        &self,
        checklist: Checklist,
        id: i64,
        provider_id: i64,
        text: &str,
    ) -> Result<u64>;

    async fn delete_provider_procedure(
        &self,
        checklist: Checklist,
        id: i64,
        provider_id: i64,
    ) -> Result<u64>;

    // ===== Reference procedures =====

    async fn list_reference_procedures(
        &self,
        claim_type: Option<ClaimType>,
    ) -> Result<Vec<ReferenceProcedure>>;

    // ===== Maintenance =====

    async fn stats(&self) -> Result<CatalogStats>;
}

//! HTTP/JSON route layer
//!
//! Maps the REST surface onto [`CatalogStore`] calls. Handlers validate
//! input and translate results; they hold no business logic.

mod clients;
mod error;
mod middleware;
mod providers;
mod reference;
mod requests;

pub use error::{ApiError, ApiResult};
pub use requests::{Changes, Created};

use crate::catalog::CatalogStore;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, put};
use axum::Router;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    request_seq: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            request_seq: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Build the application router with all `/api` routes and middleware
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let api = Router::new()
        .route("/health", get(reference::health))
        .route("/claim-types", get(reference::claim_types))
        .route("/sinistro-procedures", get(reference::list_reference_procedures))
        .route(
            "/sinistro-procedures/:claim_type",
            get(reference::list_reference_procedures_by_type),
        )
        .route("/clients", get(clients::list_clients).post(clients::create_client))
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/clients/:id/procedures",
            get(clients::list_procedures).post(clients::create_procedure),
        )
        .route(
            "/clients/:id/procedures/:proc_id",
            put(clients::update_procedure).delete(clients::delete_procedure),
        )
        .route(
            "/providers",
            get(providers::list_providers).post(providers::create_provider),
        )
        .route(
            "/providers/:id",
            get(providers::get_provider)
                .put(providers::update_provider)
                .delete(providers::delete_provider),
        )
        // The last segment is a claim type for GET/POST and a procedure id for PUT/DELETE
        .route(
            "/providers/:id/procedures/:segment",
            get(providers::list_primary)
                .post(providers::create_primary)
                .put(providers::update_primary)
                .delete(providers::delete_primary),
        )
        .route(
            "/providers/:id/additional-procedures/:segment",
            get(providers::list_additional)
                .post(providers::create_additional)
                .put(providers::update_additional)
                .delete(providers::delete_additional),
        );

    Router::new()
        .nest("/api", api)
        .fallback(reference::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(from_fn(middleware::cors))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing,
        ))
        .with_state(state)
}

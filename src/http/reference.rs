use super::requests::parse_claim_type;
use super::{ApiError, ApiResult, AppState};
use crate::catalog::{ClaimType, ReferenceProcedure};
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub(crate) struct ClaimTypeInfo {
    tag: &'static str,
    name: &'static str,
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn claim_types() -> Json<Vec<ClaimTypeInfo>> {
    Json(
        ClaimType::ALL
            .iter()
            .map(|claim| ClaimTypeInfo {
                tag: claim.tag(),
                name: claim.name(),
            })
            .collect(),
    )
}

pub(crate) async fn list_reference_procedures(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ReferenceProcedure>>> {
    Ok(Json(state.store.list_reference_procedures(None).await?))
}

pub(crate) async fn list_reference_procedures_by_type(
    State(state): State<AppState>,
    Path(claim_type): Path<String>,
) -> ApiResult<Json<Vec<ReferenceProcedure>>> {
    let claim_type = parse_claim_type(&claim_type)?;
    Ok(Json(
        state
            .store
            .list_reference_procedures(Some(claim_type))
            .await?,
    ))
}

pub(crate) async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}

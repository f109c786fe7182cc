use super::requests::{
    changed, parse_id, require_name, require_procedure_text, Changes, ClientBody, Created,
    ProcedureBody,
};
use super::{ApiError, ApiResult, AppState};
use crate::catalog::{Client, ClientProcedure};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, info};

pub(crate) async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    let clients = state.store.list_clients().await?;
    debug!(count = clients.len(), "Listed clients");
    Ok(Json(clients))
}

pub(crate) async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Client>> {
    let id = parse_id(&id, "client id")?;
    state
        .store
        .get_client(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("client {} not found", id)))
}

pub(crate) async fn create_client(
    State(state): State<AppState>,
    body: Result<Json<ClientBody>, JsonRejection>,
) -> ApiResult<Json<Created>> {
    let Json(body) = body?;
    let name = require_name(body.name)?;

    let id = state.store.create_client(&name).await?;
    info!(client_id = id, "Created client");
    Ok(Json(Created { id }))
}

pub(crate) async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ClientBody>, JsonRejection>,
) -> ApiResult<Json<Changes>> {
    let id = parse_id(&id, "client id")?;
    let Json(body) = body?;
    let name = require_name(body.name)?;

    let changes = state.store.update_client(id, &name).await?;
    changed(changes, &format!("client {} not found", id)).map(Json)
}

pub(crate) async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Changes>> {
    let id = parse_id(&id, "client id")?;
    let changes = state.store.delete_client(id).await?;
    if changes > 0 {
        info!(client_id = id, "Deleted client and its procedures");
    }
    changed(changes, &format!("client {} not found", id)).map(Json)
}

pub(crate) async fn list_procedures(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ClientProcedure>>> {
    let client_id = parse_id(&id, "client id")?;
    Ok(Json(state.store.list_client_procedures(client_id).await?))
}

pub(crate) async fn create_procedure(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProcedureBody>, JsonRejection>,
) -> ApiResult<Json<Created>> {
    let client_id = parse_id(&id, "client id")?;
    let Json(body) = body?;
    let text = require_procedure_text(body.procedure_text)?;

    let id = state.store.create_client_procedure(client_id, &text).await?;
    debug!(client_id, procedure_id = id, "Created client procedure");
    Ok(Json(Created { id }))
}

pub(crate) async fn update_procedure(
    State(state): State<AppState>,
    Path((id, proc_id)): Path<(String, String)>,
    body: Result<Json<ProcedureBody>, JsonRejection>,
) -> ApiResult<Json<Changes>> {
    let client_id = parse_id(&id, "client id")?;
    let proc_id = parse_id(&proc_id, "procedure id")?;
    let Json(body) = body?;
    let text = require_procedure_text(body.procedure_text)?;

    let changes = state
        .store
        .update_client_procedure(proc_id, client_id, &text)
        .await?;
    changed(
        changes,
        &format!("procedure {} not found for client {}", proc_id, client_id),
    )
    .map(Json)
}

pub(crate) async fn delete_procedure(
    State(state): State<AppState>,
    Path((id, proc_id)): Path<(String, String)>,
) -> ApiResult<Json<Changes>> {
    let client_id = parse_id(&id, "client id")?;
    let proc_id = parse_id(&proc_id, "procedure id")?;

    let changes = state
        .store
        .delete_client_procedure(proc_id, client_id)
        .await?;
    changed(
        changes,
        &format!("procedure {} not found for client {}", proc_id, client_id),
    )
    .map(Json)
}

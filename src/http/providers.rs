use super::requests::{
    changed, normalize_image, parse_claim_type, parse_id, require_name, require_procedure_text,
    Changes, Created, ProcedureBody, ProviderBody,
};
use super::{ApiError, ApiResult, AppState};
use crate::catalog::{Checklist, Provider, ProviderProcedure};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, info};

type ProcedureBodyResult = Result<Json<ProcedureBody>, JsonRejection>;

pub(crate) async fn list_providers(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Provider>>> {
    let providers = state.store.list_providers().await?;
    debug!(count = providers.len(), "Listed providers");
    Ok(Json(providers))
}

pub(crate) async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Provider>> {
    let id = parse_id(&id, "provider id")?;
    state
        .store
        .get_provider(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("provider {} not found", id)))
}

pub(crate) async fn create_provider(
    State(state): State<AppState>,
    body: Result<Json<ProviderBody>, JsonRejection>,
) -> ApiResult<Json<Created>> {
    let Json(body) = body?;
    let name = require_name(body.name)?;
    let image = normalize_image(body.image)?;

    let id = state.store.create_provider(&name, &image).await?;
    info!(provider_id = id, "Created provider");
    Ok(Json(Created { id }))
}

pub(crate) async fn update_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProviderBody>, JsonRejection>,
) -> ApiResult<Json<Changes>> {
    let id = parse_id(&id, "provider id")?;
    let Json(body) = body?;
    let name = require_name(body.name)?;
    let image = normalize_image(body.image)?;

    let changes = state.store.update_provider(id, &name, &image).await?;
    changed(changes, &format!("provider {} not found", id)).map(Json)
}

pub(crate) async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Changes>> {
    let id = parse_id(&id, "provider id")?;
    let changes = state.store.delete_provider(id).await?;
    if changes > 0 {
        info!(provider_id = id, "Deleted provider and both checklists");
    }
    changed(changes, &format!("provider {} not found", id)).map(Json)
}

// ===== Checklists =====
//
// Both checklists share one wire shape; the route decides which table.

async fn list_checklist(
    state: AppState,
    checklist: Checklist,
    id: &str,
    claim_type: &str,
) -> ApiResult<Json<Vec<ProviderProcedure>>> {
    let provider_id = parse_id(id, "provider id")?;
    let claim_type = parse_claim_type(claim_type)?;
    let rows = state
        .store
        .list_provider_procedures(checklist, provider_id, claim_type)
        .await?;
    Ok(Json(rows))
}

async fn create_in_checklist(
    state: AppState,
    checklist: Checklist,
    id: &str,
    claim_type: &str,
    body: ProcedureBodyResult,
) -> ApiResult<Json<Created>> {
    let provider_id = parse_id(id, "provider id")?;
    let claim_type = parse_claim_type(claim_type)?;
    let Json(body) = body?;
    let text = require_procedure_text(body.procedure_text)?;

    let id = state
        .store
        .create_provider_procedure(checklist, provider_id, claim_type, &text)
        .await?;
    debug!(
        provider_id,
        procedure_id = id,
        %checklist,
        %claim_type,
        "Created provider procedure"
    );
    Ok(Json(Created { id }))
}

async fn update_in_checklist(
    state: AppState,
    checklist: Checklist,
    id: &str,
    proc_id: &str,
    body: ProcedureBodyResult,
) -> ApiResult<Json<Changes>> {
    let provider_id = parse_id(id, "provider id")?;
    let proc_id = parse_id(proc_id, "procedure id")?;
    let Json(body) = body?;
    let text = require_procedure_text(body.procedure_text)?;

    let changes = state
        .store
        .update_provider_procedure(checklist, proc_id, provider_id, &text)
        .await?;
    changed(
        changes,
        &format!(
            "{} procedure {} not found for provider {}",
            checklist, proc_id, provider_id
        ),
    )
    .map(Json)
}

async fn delete_from_checklist(
    state: AppState,
    checklist: Checklist,
    id: &str,
    proc_id: &str,
) -> ApiResult<Json<Changes>> {
    let provider_id = parse_id(id, "provider id")?;
    let proc_id = parse_id(proc_id, "procedure id")?;

    let changes = state
        .store
        .delete_provider_procedure(checklist, proc_id, provider_id)
        .await?;
    changed(
        changes,
        &format!(
            "{} procedure {} not found for provider {}",
            checklist, proc_id, provider_id
        ),
    )
    .map(Json)
}

pub(crate) async fn list_primary(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
) -> ApiResult<Json<Vec<ProviderProcedure>>> {
    list_checklist(state, Checklist::Primary, &id, &segment).await
}

pub(crate) async fn create_primary(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
    body: ProcedureBodyResult,
) -> ApiResult<Json<Created>> {
    create_in_checklist(state, Checklist::Primary, &id, &segment, body).await
}

pub(crate) async fn update_primary(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
    body: ProcedureBodyResult,
) -> ApiResult<Json<Changes>> {
    update_in_checklist(state, Checklist::Primary, &id, &segment, body).await
}

pub(crate) async fn delete_primary(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
) -> ApiResult<Json<Changes>> {
    delete_from_checklist(state, Checklist::Primary, &id, &segment).await
}

pub(crate) async fn list_additional(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
) -> ApiResult<Json<Vec<ProviderProcedure>>> {
    list_checklist(state, Checklist::Additional, &id, &segment).await
}

pub(crate) async fn create_additional(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
    body: ProcedureBodyResult,
) -> ApiResult<Json<Created>> {
    create_in_checklist(state, Checklist::Additional, &id, &segment, body).await
}

pub(crate) async fn update_additional(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
    body: ProcedureBodyResult,
) -> ApiResult<Json<Changes>> {
    update_in_checklist(state, Checklist::Additional, &id, &segment, body).await
}

pub(crate) async fn delete_additional(
    State(state): State<AppState>,
    Path((id, segment)): Path<(String, String)>,
) -> ApiResult<Json<Changes>> {
    delete_from_checklist(state, Checklist::Additional, &id, &segment).await
}

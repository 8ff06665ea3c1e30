//! Request handlers for the party routes
//!
//! The hierarchy service is synchronous; each handler runs its store work
//! on tokio's blocking pool.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::application::services::HierarchyService;
use crate::application::ApplicationResult;
use crate::domain::{NewParty, Party};

async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&HierarchyService) -> ApplicationResult<T> + Send + 'static,
    T: Send + 'static,
{
    let hierarchy = state.hierarchy.clone();
    let result = tokio::task::spawn_blocking(move || f(&hierarchy)).await?;
    Ok(result?)
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/parties
pub async fn list_parties(State(state): State<AppState>) -> Result<Json<Vec<Party>>, ApiError> {
    let parties = run_blocking(&state, |h| h.list()).await?;
    Ok(Json(parties))
}

/// GET /api/parties/:id
pub async fn get_party(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Party>, ApiError> {
    let party = run_blocking(&state, move |h| h.get(&id)).await?;
    Ok(Json(party))
}

/// POST /api/parties
///
/// Body rejections are answered with the same `{ "error": ... }` shape as
/// every other failure.
pub async fn create_party(
    State(state): State<AppState>,
    payload: Result<Json<NewParty>, JsonRejection>,
) -> Result<(StatusCode, Json<Party>), ApiError> {
    let Json(input) = payload?;
    debug!("create_party: name={}, owner={:?}", input.name, input.owner_id);
    let party = run_blocking(&state, move |h| h.create(input)).await?;
    Ok((StatusCode::CREATED, Json(party)))
}

/// DELETE /api/parties/:id
pub async fn delete_party(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    run_blocking(&state, move |h| h.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/parties/:id/parents
pub async fn list_parents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Party>>, ApiError> {
    let parents = run_blocking(&state, move |h| h.ancestors(&id)).await?;
    Ok(Json(parents))
}

/// GET /api/parties/:id/subsidiaries
pub async fn list_subsidiaries(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Party>>, ApiError> {
    let subsidiaries = run_blocking(&state, move |h| h.descendants(&id)).await?;
    Ok(Json(subsidiaries))
}

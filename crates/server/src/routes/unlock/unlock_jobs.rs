use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::unlock::unlock_job::{self, UnlockKind, UnlockStatus};
use service::integrity::EntityKind;
use service::pagination::Pagination;
use service::unlock::unlock_jobs::{self, NewUnlockJob, UnlockJobFilter, UnlockJobPatch};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/desbloqueios", tag = "desbloqueios", request_body = crate::openapi::NewUnlockJobDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Phone or user not found", body = crate::openapi::ErrorDoc)))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewUnlockJob>) -> Result<(StatusCode, Json<unlock_job::Model>), JsonApiError> {
    let created = unlock_jobs::create_unlock_job(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/desbloqueios", tag = "desbloqueios", params(crate::openapi::PageParams, crate::openapi::UnlockJobFilterParams),
    responses((status = 200, description = "OK")))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<UnlockJobFilter>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<unlock_job::Model>>, JsonApiError> {
    Ok(Json(unlock_jobs::list_unlock_jobs(&state.db, filter, page).await?))
}

pub async fn by_status(
    State(state): State<AppState>,
    Path(status): Path<UnlockStatus>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<unlock_job::Model>>, JsonApiError> {
    let filter = UnlockJobFilter { status: Some(status), ..Default::default() };
    Ok(Json(unlock_jobs::list_unlock_jobs(&state.db, filter, page).await?))
}

pub async fn by_kind(
    State(state): State<AppState>,
    Path(kind): Path<UnlockKind>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<unlock_job::Model>>, JsonApiError> {
    let filter = UnlockJobFilter { tipo_desbloqueio: Some(kind), ..Default::default() };
    Ok(Json(unlock_jobs::list_unlock_jobs(&state.db, filter, page).await?))
}

#[utoipa::path(get, path = "/celulares/{id}/desbloqueios", tag = "desbloqueios", params(("id" = Uuid, Path, description = "Phone id"), crate::openapi::PageParams),
    responses((status = 200, description = "OK"), (status = 404, description = "Phone not found")))]
pub async fn by_phone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<unlock_job::Model>>, JsonApiError> {
    Ok(Json(unlock_jobs::list_phone_unlock_jobs(&state.db, id, page).await?))
}

#[utoipa::path(get, path = "/desbloqueios/{id}", tag = "desbloqueios", params(("id" = Uuid, Path, description = "Unlock job id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<unlock_job::Model>, JsonApiError> {
    unlock_jobs::get_unlock_job(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::UnlockJob))
}

#[utoipa::path(patch, path = "/desbloqueios/{id}", tag = "desbloqueios", params(("id" = Uuid, Path, description = "Unlock job id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid input"), (status = 404, description = "Job or user not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UnlockJobPatch>,
) -> Result<Json<unlock_job::Model>, JsonApiError> {
    Ok(Json(unlock_jobs::update_unlock_job(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/desbloqueios/{id}", tag = "desbloqueios", params(("id" = Uuid, Path, description = "Unlock job id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    unlock_jobs::delete_unlock_job(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::UnlockJob.label())))
}

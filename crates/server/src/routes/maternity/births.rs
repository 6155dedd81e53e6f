use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::maternity::birth;
use service::integrity::EntityKind;
use service::maternity::births::{self, BirthFilter, BirthPatch, NewBirth};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/partos", tag = "partos", request_body = crate::openapi::NewBirthDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Birth already registered or invalid input", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Pregnant person or professional not found", body = crate::openapi::ErrorDoc)))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewBirth>) -> Result<(StatusCode, Json<birth::Model>), JsonApiError> {
    let created = births::create_birth(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/partos", tag = "partos", params(crate::openapi::PageParams, crate::openapi::BirthFilterParams),
    responses((status = 200, description = "OK")))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<BirthFilter>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<birth::Model>>, JsonApiError> {
    Ok(Json(births::list_births(&state.db, filter, page).await?))
}

#[utoipa::path(get, path = "/gestantes/{id}/parto", tag = "partos", params(("id" = Uuid, Path, description = "Pregnant person id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Pregnant person or birth not found", body = crate::openapi::ErrorDoc)))]
pub async fn by_pregnant_person(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<birth::Model>, JsonApiError> {
    Ok(Json(births::get_pregnant_person_birth(&state.db, id).await?))
}

#[utoipa::path(get, path = "/partos/{id}", tag = "partos", params(("id" = Uuid, Path, description = "Birth id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<birth::Model>, JsonApiError> {
    births::get_birth(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found(EntityKind::Birth))
}

#[utoipa::path(patch, path = "/partos/{id}", tag = "partos", params(("id" = Uuid, Path, description = "Birth id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Conflict or invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BirthPatch>,
) -> Result<Json<birth::Model>, JsonApiError> {
    Ok(Json(births::update_birth(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/partos/{id}", tag = "partos", params(("id" = Uuid, Path, description = "Birth id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    births::delete_birth(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::Birth.label())))
}

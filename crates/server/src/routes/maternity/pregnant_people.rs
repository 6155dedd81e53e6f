use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::maternity::pregnant_person;
use service::integrity::EntityKind;
use service::maternity::pregnant_people::{self, NewPregnantPerson, PregnantPersonPatch};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/gestantes", tag = "gestantes", request_body = crate::openapi::NewPregnantPersonDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "CPF already registered or invalid input", body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewPregnantPerson>,
) -> Result<(StatusCode, Json<pregnant_person::Model>), JsonApiError> {
    let created = pregnant_people::create_pregnant_person(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/gestantes", tag = "gestantes", params(crate::openapi::PageParams), responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<pregnant_person::Model>>, JsonApiError> {
    Ok(Json(pregnant_people::list_pregnant_people(&state.db, page).await?))
}

#[utoipa::path(get, path = "/gestantes/{id}", tag = "gestantes", params(("id" = Uuid, Path, description = "Pregnant person id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<pregnant_person::Model>, JsonApiError> {
    pregnant_people::get_pregnant_person(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::PregnantPerson))
}

pub async fn by_cpf(State(state): State<AppState>, Path(cpf): Path<String>) -> Result<Json<pregnant_person::Model>, JsonApiError> {
    pregnant_people::find_pregnant_person_by_cpf(&state.db, &cpf)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::PregnantPerson))
}

#[utoipa::path(patch, path = "/gestantes/{id}", tag = "gestantes", params(("id" = Uuid, Path, description = "Pregnant person id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Conflict or invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PregnantPersonPatch>,
) -> Result<Json<pregnant_person::Model>, JsonApiError> {
    Ok(Json(pregnant_people::update_pregnant_person(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/gestantes/{id}", tag = "gestantes", params(("id" = Uuid, Path, description = "Pregnant person id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 400, description = "Still referenced"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    pregnant_people::delete_pregnant_person(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::PregnantPerson.label())))
}

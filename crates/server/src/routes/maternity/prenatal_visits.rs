use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::maternity::prenatal_visit;
use service::integrity::EntityKind;
use service::maternity::prenatal_visits::{self, NewPrenatalVisit, PrenatalVisitFilter, PrenatalVisitPatch};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/consultas", tag = "consultas", request_body = crate::openapi::NewPrenatalVisitDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Pregnant person or professional not found", body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewPrenatalVisit>,
) -> Result<(StatusCode, Json<prenatal_visit::Model>), JsonApiError> {
    let created = prenatal_visits::create_prenatal_visit(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/consultas", tag = "consultas", params(crate::openapi::PageParams, crate::openapi::PrenatalVisitFilterParams),
    responses((status = 200, description = "OK")))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PrenatalVisitFilter>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<prenatal_visit::Model>>, JsonApiError> {
    Ok(Json(prenatal_visits::list_prenatal_visits(&state.db, filter, page).await?))
}

pub async fn by_pregnant_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<prenatal_visit::Model>>, JsonApiError> {
    Ok(Json(prenatal_visits::list_pregnant_person_visits(&state.db, id, page).await?))
}

pub async fn by_professional(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<prenatal_visit::Model>>, JsonApiError> {
    Ok(Json(prenatal_visits::list_professional_visits(&state.db, id, page).await?))
}

#[utoipa::path(get, path = "/consultas/{id}", tag = "consultas", params(("id" = Uuid, Path, description = "Visit id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<prenatal_visit::Model>, JsonApiError> {
    prenatal_visits::get_prenatal_visit(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::PrenatalVisit))
}

#[utoipa::path(patch, path = "/consultas/{id}", tag = "consultas", params(("id" = Uuid, Path, description = "Visit id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PrenatalVisitPatch>,
) -> Result<Json<prenatal_visit::Model>, JsonApiError> {
    Ok(Json(prenatal_visits::update_prenatal_visit(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/consultas/{id}", tag = "consultas", params(("id" = Uuid, Path, description = "Visit id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    prenatal_visits::delete_prenatal_visit(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::PrenatalVisit.label())))
}

use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::maternity::professional;
use service::integrity::EntityKind;
use service::maternity::professionals::{self, NewProfessional, ProfessionalFilter, ProfessionalPatch};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/profissionais", tag = "profissionais", request_body = crate::openapi::NewProfessionalDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Email already registered or invalid input", body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewProfessional>,
) -> Result<(StatusCode, Json<professional::Model>), JsonApiError> {
    let created = professionals::create_professional(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/profissionais", tag = "profissionais", params(crate::openapi::PageParams, crate::openapi::ProfessionalFilterParams),
    responses((status = 200, description = "OK")))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProfessionalFilter>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<professional::Model>>, JsonApiError> {
    Ok(Json(professionals::list_professionals(&state.db, filter, page).await?))
}

#[utoipa::path(get, path = "/profissionais/{id}", tag = "profissionais", params(("id" = Uuid, Path, description = "Professional id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<professional::Model>, JsonApiError> {
    professionals::get_professional(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::Professional))
}

pub async fn by_email(State(state): State<AppState>, Path(email): Path<String>) -> Result<Json<professional::Model>, JsonApiError> {
    professionals::find_professional_by_email(&state.db, &email)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::Professional))
}

#[utoipa::path(patch, path = "/profissionais/{id}", tag = "profissionais", params(("id" = Uuid, Path, description = "Professional id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Conflict or invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProfessionalPatch>,
) -> Result<Json<professional::Model>, JsonApiError> {
    Ok(Json(professionals::update_professional(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/profissionais/{id}", tag = "profissionais", params(("id" = Uuid, Path, description = "Professional id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 400, description = "Referenced by visits or births"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    professionals::delete_professional(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::Professional.label())))
}

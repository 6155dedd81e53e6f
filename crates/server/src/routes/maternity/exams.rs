use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::maternity::exam;
use service::integrity::EntityKind;
use service::maternity::exams::{self, ExamFilter, ExamPatch, NewExam};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/exames", tag = "exames", request_body = crate::openapi::NewExamDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Pregnant person not found", body = crate::openapi::ErrorDoc)))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewExam>) -> Result<(StatusCode, Json<exam::Model>), JsonApiError> {
    let created = exams::create_exam(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/exames", tag = "exames", params(crate::openapi::PageParams, crate::openapi::ExamFilterParams),
    responses((status = 200, description = "OK")))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ExamFilter>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<exam::Model>>, JsonApiError> {
    Ok(Json(exams::list_exams(&state.db, filter, page).await?))
}

pub async fn by_pregnant_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<exam::Model>>, JsonApiError> {
    Ok(Json(exams::list_pregnant_person_exams(&state.db, id, page).await?))
}

#[utoipa::path(get, path = "/exames/{id}", tag = "exames", params(("id" = Uuid, Path, description = "Exam id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<exam::Model>, JsonApiError> {
    exams::get_exam(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found(EntityKind::Exam))
}

#[utoipa::path(patch, path = "/exames/{id}", tag = "exames", params(("id" = Uuid, Path, description = "Exam id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ExamPatch>,
) -> Result<Json<exam::Model>, JsonApiError> {
    Ok(Json(exams::update_exam(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/exames/{id}", tag = "exames", params(("id" = Uuid, Path, description = "Exam id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    exams::delete_exam(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::Exam.label())))
}

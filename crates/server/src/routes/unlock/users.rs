use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::unlock::user;
use service::integrity::EntityKind;
use service::pagination::Pagination;
use service::unlock::users::{self, NewUser, UserPatch};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/usuarios", tag = "usuarios", request_body = crate::openapi::NewUserDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Duplicate username/email or invalid input", body = crate::openapi::ErrorDoc)))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewUser>) -> Result<(StatusCode, Json<user::Model>), JsonApiError> {
    let created = users::create_user(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/usuarios", tag = "usuarios", params(crate::openapi::PageParams), responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<user::Model>>, JsonApiError> {
    Ok(Json(users::list_users(&state.db, page).await?))
}

#[utoipa::path(get, path = "/usuarios/{id}", tag = "usuarios", params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<user::Model>, JsonApiError> {
    users::get_user(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found(EntityKind::User))
}

pub async fn by_username(State(state): State<AppState>, Path(username): Path<String>) -> Result<Json<user::Model>, JsonApiError> {
    users::find_user_by_username(&state.db, &username)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::User))
}

#[utoipa::path(patch, path = "/usuarios/{id}", tag = "usuarios", params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Conflict or invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<user::Model>, JsonApiError> {
    Ok(Json(users::update_user(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/usuarios/{id}", tag = "usuarios", params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 400, description = "Referenced by unlock jobs"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    users::delete_user(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::User.label())))
}

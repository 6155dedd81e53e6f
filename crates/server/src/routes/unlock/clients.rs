use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::unlock::client;
use service::integrity::EntityKind;
use service::pagination::Pagination;
use service::unlock::clients::{self, ClientPatch, NewClient};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/clientes", tag = "clientes", request_body = crate::openapi::NewClientDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Email already registered or invalid input", body = crate::openapi::ErrorDoc)))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewClient>) -> Result<(StatusCode, Json<client::Model>), JsonApiError> {
    let created = clients::create_client(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/clientes", tag = "clientes", params(crate::openapi::PageParams), responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<AppState>, Query(page): Query<Pagination>) -> Result<Json<Vec<client::Model>>, JsonApiError> {
    Ok(Json(clients::list_clients(&state.db, page).await?))
}

#[utoipa::path(get, path = "/clientes/{id}", tag = "clientes", params(("id" = Uuid, Path, description = "Client id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<client::Model>, JsonApiError> {
    clients::get_client(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found(EntityKind::Client))
}

pub async fn by_email(State(state): State<AppState>, Path(email): Path<String>) -> Result<Json<client::Model>, JsonApiError> {
    clients::find_client_by_email(&state.db, &email)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::Client))
}

#[utoipa::path(patch, path = "/clientes/{id}", tag = "clientes", params(("id" = Uuid, Path, description = "Client id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Conflict or invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ClientPatch>,
) -> Result<Json<client::Model>, JsonApiError> {
    Ok(Json(clients::update_client(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/clientes/{id}", tag = "clientes", params(("id" = Uuid, Path, description = "Client id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 400, description = "Client still owns phones"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    clients::delete_client(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::Client.label())))
}

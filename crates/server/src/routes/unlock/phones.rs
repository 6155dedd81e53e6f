use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Removed;
use models::unlock::phone;
use service::integrity::EntityKind;
use service::pagination::Pagination;
use service::unlock::phones::{self, NewPhone, PhoneFilter, PhonePatch};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/celulares", tag = "celulares", request_body = crate::openapi::NewPhoneDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "IMEI already registered or invalid input", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Client not found", body = crate::openapi::ErrorDoc)))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewPhone>) -> Result<(StatusCode, Json<phone::Model>), JsonApiError> {
    let created = phones::create_phone(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/celulares", tag = "celulares", params(crate::openapi::PageParams, crate::openapi::PhoneFilterParams),
    responses((status = 200, description = "OK")))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PhoneFilter>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<phone::Model>>, JsonApiError> {
    Ok(Json(phones::list_phones(&state.db, filter, page).await?))
}

#[utoipa::path(get, path = "/clientes/{id}/celulares", tag = "celulares", params(("id" = Uuid, Path, description = "Client id"), crate::openapi::PageParams),
    responses((status = 200, description = "OK"), (status = 404, description = "Client not found")))]
pub async fn by_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<phone::Model>>, JsonApiError> {
    Ok(Json(phones::list_client_phones(&state.db, id, page).await?))
}

#[utoipa::path(get, path = "/celulares/{id}", tag = "celulares", params(("id" = Uuid, Path, description = "Phone id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<phone::Model>, JsonApiError> {
    phones::get_phone(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found(EntityKind::Phone))
}

pub async fn by_imei(State(state): State<AppState>, Path(imei): Path<String>) -> Result<Json<phone::Model>, JsonApiError> {
    phones::find_phone_by_imei(&state.db, &imei)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(EntityKind::Phone))
}

#[utoipa::path(patch, path = "/celulares/{id}", tag = "celulares", params(("id" = Uuid, Path, description = "Phone id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Conflict or invalid input"), (status = 404, description = "Phone or new client not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PhonePatch>,
) -> Result<Json<phone::Model>, JsonApiError> {
    Ok(Json(phones::update_phone(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/celulares/{id}", tag = "celulares", params(("id" = Uuid, Path, description = "Phone id")),
    responses((status = 200, description = "Removed", body = crate::openapi::RemovedDoc), (status = 400, description = "Phone has unlock jobs"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Removed>, JsonApiError> {
    phones::delete_phone(&state.db, id).await?;
    Ok(Json(Removed::new(EntityKind::Phone.label())))
}

use axum::{extract::{Path, Query, State}, Json};
use service::reporting::Period;
use service::unlock::reports::{self, ClientHistory, GeneralStats, KindBreakdown, PendingJobs, PeriodReport};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/relatorios/desbloqueios-pendentes", tag = "relatorios", responses((status = 200, description = "OK")))]
pub async fn pending(State(state): State<AppState>) -> Result<Json<PendingJobs>, JsonApiError> {
    Ok(Json(reports::pending_jobs(&state.db).await?))
}

#[utoipa::path(get, path = "/relatorios/desbloqueios-periodo", tag = "relatorios", params(crate::openapi::PeriodParams),
    responses((status = 200, description = "OK"), (status = 400, description = "data_inicio after data_fim", body = crate::openapi::ErrorDoc)))]
pub async fn period(State(state): State<AppState>, Query(period): Query<Period>) -> Result<Json<PeriodReport>, JsonApiError> {
    Ok(Json(reports::jobs_in_period(&state.db, period).await?))
}

#[utoipa::path(get, path = "/relatorios/tipos-desbloqueio", tag = "relatorios", responses((status = 200, description = "OK")))]
pub async fn by_kind(State(state): State<AppState>) -> Result<Json<KindBreakdown>, JsonApiError> {
    Ok(Json(reports::jobs_by_kind(&state.db).await?))
}

#[utoipa::path(get, path = "/clientes/{id}/historico", tag = "relatorios", params(("id" = Uuid, Path, description = "Client id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Client not found")))]
pub async fn client_history(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ClientHistory>, JsonApiError> {
    Ok(Json(reports::client_history(&state.db, id).await?))
}

#[utoipa::path(get, path = "/estatisticas/gerais", tag = "estatisticas", responses((status = 200, description = "OK")))]
pub async fn general(State(state): State<AppState>) -> Result<Json<GeneralStats>, JsonApiError> {
    Ok(Json(reports::general_stats(&state.db).await?))
}

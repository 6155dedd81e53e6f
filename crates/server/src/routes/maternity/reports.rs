use axum::{extract::{Path, Query, State}, Json};
use service::maternity::reports::{self, BirthKindBreakdown, BirthPeriodReport, GeneralStats, PregnancyHistory};
use service::reporting::Period;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/relatorios/partos-periodo", tag = "relatorios", params(crate::openapi::PeriodParams),
    responses((status = 200, description = "OK"), (status = 400, description = "data_inicio after data_fim", body = crate::openapi::ErrorDoc)))]
pub async fn period(State(state): State<AppState>, Query(period): Query<Period>) -> Result<Json<BirthPeriodReport>, JsonApiError> {
    Ok(Json(reports::births_in_period(&state.db, period).await?))
}

#[utoipa::path(get, path = "/relatorios/tipos-parto", tag = "relatorios", responses((status = 200, description = "OK")))]
pub async fn by_kind(State(state): State<AppState>) -> Result<Json<BirthKindBreakdown>, JsonApiError> {
    Ok(Json(reports::births_by_kind(&state.db).await?))
}

#[utoipa::path(get, path = "/gestantes/{id}/historico", tag = "relatorios", params(("id" = Uuid, Path, description = "Pregnant person id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Pregnant person not found")))]
pub async fn pregnant_person_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PregnancyHistory>, JsonApiError> {
    Ok(Json(reports::pregnant_person_history(&state.db, id).await?))
}

#[utoipa::path(get, path = "/estatisticas/gerais", tag = "estatisticas", responses((status = 200, description = "OK")))]
pub async fn general(State(state): State<AppState>) -> Result<Json<GeneralStats>, JsonApiError> {
    Ok(Json(reports::general_stats(&state.db).await?))
}

//! Phone-unlock shop HTTP surface.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub mod clients;
pub mod phones;
pub mod reports;
pub mod unlock_jobs;
pub mod users;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios", get(users::list).post(users::create))
        .route("/usuarios/username/:username", get(users::by_username))
        .route("/usuarios/:id", get(users::get).patch(users::update).delete(users::delete))
        .route("/clientes", get(clients::list).post(clients::create))
        .route("/clientes/email/:email", get(clients::by_email))
        .route("/clientes/:id", get(clients::get).patch(clients::update).delete(clients::delete))
        .route("/clientes/:id/celulares", get(phones::by_client))
        .route("/clientes/:id/historico", get(reports::client_history))
        .route("/celulares", get(phones::list).post(phones::create))
        .route("/celulares/imei/:imei", get(phones::by_imei))
        .route("/celulares/:id", get(phones::get).patch(phones::update).delete(phones::delete))
        .route("/celulares/:id/desbloqueios", get(unlock_jobs::by_phone))
        .route("/desbloqueios", get(unlock_jobs::list).post(unlock_jobs::create))
        .route("/desbloqueios/status/:status", get(unlock_jobs::by_status))
        .route("/desbloqueios/tipo/:tipo", get(unlock_jobs::by_kind))
        .route("/desbloqueios/:id", get(unlock_jobs::get).patch(unlock_jobs::update).delete(unlock_jobs::delete))
        .route("/relatorios/desbloqueios-pendentes", get(reports::pending))
        .route("/relatorios/desbloqueios-periodo", get(reports::period))
        .route("/relatorios/tipos-desbloqueio", get(reports::by_kind))
        .route("/estatisticas/gerais", get(reports::general))
}

/// Route index served at `/`.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "API de Gerenciamento de Desbloqueio de Celulares",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "usuarios": "/usuarios",
            "clientes": "/clientes",
            "celulares": "/celulares",
            "desbloqueios": "/desbloqueios",
            "relatorios": [
                "/relatorios/desbloqueios-pendentes",
                "/relatorios/desbloqueios-periodo",
                "/relatorios/tipos-desbloqueio",
                "/clientes/{id}/historico"
            ],
            "estatisticas": "/estatisticas/gerais",
            "health": "/health",
            "documentacao": "/api-docs/openapi.json"
        }
    }))
}

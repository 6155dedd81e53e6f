//! Maternity ward HTTP surface.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub mod births;
pub mod exams;
pub mod pregnant_people;
pub mod prenatal_visits;
pub mod professionals;
pub mod reports;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gestantes", get(pregnant_people::list).post(pregnant_people::create))
        .route("/gestantes/cpf/:cpf", get(pregnant_people::by_cpf))
        .route(
            "/gestantes/:id",
            get(pregnant_people::get).patch(pregnant_people::update).delete(pregnant_people::delete),
        )
        .route("/gestantes/:id/consultas", get(prenatal_visits::by_pregnant_person))
        .route("/gestantes/:id/exames", get(exams::by_pregnant_person))
        .route("/gestantes/:id/parto", get(births::by_pregnant_person))
        .route("/gestantes/:id/historico", get(reports::pregnant_person_history))
        .route("/profissionais", get(professionals::list).post(professionals::create))
        .route("/profissionais/email/:email", get(professionals::by_email))
        .route(
            "/profissionais/:id",
            get(professionals::get).patch(professionals::update).delete(professionals::delete),
        )
        .route("/profissionais/:id/consultas", get(prenatal_visits::by_professional))
        .route("/consultas", get(prenatal_visits::list).post(prenatal_visits::create))
        .route(
            "/consultas/:id",
            get(prenatal_visits::get).patch(prenatal_visits::update).delete(prenatal_visits::delete),
        )
        .route("/exames", get(exams::list).post(exams::create))
        .route("/exames/:id", get(exams::get).patch(exams::update).delete(exams::delete))
        .route("/partos", get(births::list).post(births::create))
        .route("/partos/:id", get(births::get).patch(births::update).delete(births::delete))
        .route("/relatorios/partos-periodo", get(reports::period))
        .route("/relatorios/tipos-parto", get(reports::by_kind))
        .route("/estatisticas/gerais", get(reports::general))
}

/// Route index served at `/`.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "API de Gerenciamento de Maternidade",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "gestantes": "/gestantes",
            "profissionais": "/profissionais",
            "consultas": "/consultas",
            "exames": "/exames",
            "partos": "/partos",
            "relatorios": [
                "/relatorios/partos-periodo",
                "/relatorios/tipos-parto",
                "/gestantes/{id}/historico"
            ],
            "estatisticas": "/estatisticas/gerais",
            "health": "/health",
            "documentacao": "/api-docs/openapi.json"
        }
    }))
}

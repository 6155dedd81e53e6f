use axum::{extract::State, routing::get, Json, Router};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::openapi;
use crate::state::AppState;

pub mod maternity;
pub mod unlock;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthDoc)))]
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health::healthy(state.service))
}

fn with_layers(router: Router) -> Router {
    router
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时记录状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Phone-unlock shop application router.
pub fn build_unlock_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(unlock::index))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::unlock_spec))
        .merge(unlock::routes())
        .with_state(state);
    with_layers(app)
}

/// Maternity ward application router.
pub fn build_maternity_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(maternity::index))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::maternity_spec))
        .merge(maternity::routes())
        .with_state(state);
    with_layers(app)
}

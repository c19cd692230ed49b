// src/api/handlers/system_handler.rs
use axum::{routing::get, Json, Router};

use crate::api::dto::system_dto::HealthResponse;
use crate::api::AppState;

/// ヘルスチェック。入力も副作用もない
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::online())
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .with_state(app_state)
}

// src/api/handlers/container_handler.rs
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::api::dto::container_dto::DeleteContainerRequest;
use crate::api::AppState;
use crate::error::AppError;
use crate::logging::DeletionOutcome;

/// コンテナ削除
///
/// ボディは Json 抽出器を使わずに自前でパースする。
/// 不正な JSON、Content-Type の欠落、上限超過のボディも「name がない」として扱う。
pub async fn delete_container_handler(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                reason = %rejection.body_text(),
                "Unreadable request body"
            );
            return name_required().into_response();
        }
    };

    let Some(name) = DeleteContainerRequest::container_name(&body) else {
        return name_required().into_response();
    };

    info!(container = %name, "Container deletion requested");

    let result = app_state.container_service.delete_container(&name).await;

    // 完了ログ用に結果をレスポンスに載せる
    let outcome = DeletionOutcome {
        container: name.to_string(),
        outcome: match &result {
            Ok(_) => "deleted",
            Err(e) => e.kind(),
        },
    };

    let mut response = result.map(Json).into_response();
    response.extensions_mut().insert(outcome);
    response
}

fn name_required() -> AppError {
    AppError::BadRequest("Container name is required".to_string())
}

pub fn container_router(app_state: AppState) -> Router {
    Router::new()
        .route("/delete-container/", post(delete_container_handler))
        .route("/delete-container", post(delete_container_handler))
        .with_state(app_state)
}

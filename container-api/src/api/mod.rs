// src/api/mod.rs
use crate::config::AppConfig;
use crate::infrastructure::runtime::ContainerRuntime;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::container_service::ContainerService;
use crate::service::self_destruct_service::SelfDestructService;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub mod dto;
pub mod handlers;

/// リクエストボディの上限
pub const BODY_LIMIT: usize = 64 * 1024;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub container_service: Arc<ContainerService>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        runtime: Arc<dyn ContainerRuntime>,
        shutdown: CancellationToken,
    ) -> Self {
        let self_destruct = Arc::new(SelfDestructService::new(
            config.self_destruct.clone(),
            shutdown,
        ));
        let container_service = Arc::new(ContainerService::new(runtime, self_destruct));

        Self { container_service }
    }
}

/// 全ルーターを統合したアプリケーションを構築
pub fn create_app(app_state: AppState) -> Router {
    Router::new()
        .merge(handlers::system_handler::system_router(app_state.clone()))
        .merge(handlers::container_handler::container_router(app_state))
        // 上限超過は抽出器のエラーとしてハンドラに届く
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
}

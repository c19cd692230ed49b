// src/logging/mod.rs

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// リクエスト ID を返すレスポンスヘッダー
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[macro_export]
macro_rules! log_with_context {
    ($level:expr, $msg:expr $(, $($key:tt => $value:expr),* $(,)?)?) => {
        match $level {
            tracing::Level::ERROR => {
                tracing::error!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::WARN => {
                tracing::warn!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            _ => {
                tracing::info!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
        }
    };
}

// リクエストコンテキスト
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub path: String,
    pub method: String,
}

/// 削除ハンドラがレスポンス拡張に載せる結果
#[derive(Clone, Debug)]
pub struct DeletionOutcome {
    pub container: String,
    pub outcome: &'static str,
}

/// ステータスコードに応じたログレベル
pub fn level_for_status(status: u16) -> tracing::Level {
    if status >= 500 {
        tracing::Level::ERROR
    } else if status >= 400 {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    }
}

// ロギングミドルウェア
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let context = req.extensions().get::<RequestContext>().cloned();

    let response = next.run(req).await;
    let Some(context) = context else {
        return response;
    };

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    // 削除リクエストはコンテナ名と結果も記録する
    match response.extensions().get::<DeletionOutcome>() {
        Some(deletion) => log_with_context!(
            level_for_status(status),
            "Container deletion completed",
            "request_id" => &context.request_id,
            "container" => &deletion.container,
            "outcome" => deletion.outcome,
            "status" => status,
            "duration_ms" => duration_ms,
        ),
        None => log_with_context!(
            level_for_status(status),
            "Request completed",
            "request_id" => &context.request_id,
            "method" => &context.method,
            "path" => &context.path,
            "status" => status,
            "duration_ms" => duration_ms,
        ),
    }

    response
}

// RequestContextを生成し、レスポンスにリクエスト ID を返すミドルウェア
pub async fn inject_request_context(mut req: Request<Body>, next: Next) -> Response {
    let context = RequestContext {
        request_id: Uuid::new_v4().to_string(),
        path: req.uri().path().to_string(),
        method: req.method().to_string(),
    };
    let request_id = context.request_id.clone();

    req.extensions_mut().insert(context);
    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

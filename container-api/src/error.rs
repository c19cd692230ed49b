// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::infrastructure::runtime::RuntimeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Error deleting container: {0}")]
    RuntimeFailure(String),

    #[error("Authentication failed")]
    Unauthorized(String),

    #[error("SSH connection failed: {0}")]
    SshConnection(String),

    #[error("An error occurred: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// ログ用の分類名
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::RuntimeFailure(_) => "runtime_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::SshConnection(_) => "ssh_error",
            AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::RuntimeFailure(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::SshConnection(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<RuntimeError> for AppError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Authentication(detail) => AppError::Unauthorized(detail),
            RuntimeError::Ssh(detail) => AppError::SshConnection(detail),
            RuntimeError::Spawn(e) => AppError::InternalServerError(e.to_string()),
            RuntimeError::Join(detail) => AppError::InternalServerError(detail),
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            // 認証失敗の詳細はクライアントに返さずサーバーログにのみ出す
            AppError::Unauthorized(detail) => {
                error!(detail = %detail, "SSH authentication failed");
            }
            AppError::SshConnection(_) | AppError::InternalServerError(_) => {
                error!(error = %self, "Request failed with server error");
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

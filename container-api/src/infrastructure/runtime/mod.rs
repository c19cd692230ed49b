// src/infrastructure/runtime/mod.rs

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AppConfig, RuntimeMode};
use crate::domain::container::ContainerName;

pub mod local;
pub mod ssh;

pub use local::LocalRuntime;
pub use ssh::SshRuntime;

/// ランタイム呼び出しエラー
///
/// ランタイム自身が失敗を報告した場合はエラーではなく CommandOutput で返す。
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("failed to run container runtime: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("{0}")]
    Ssh(String),

    #[error("runtime task aborted: {0}")]
    Join(String),
}

/// 1回のランタイム呼び出し結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn from_bytes(stdout: &[u8], stderr: &[u8], exit_code: i32) -> Self {
        Self {
            stdout: String::from_utf8_lossy(stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
            exit_code,
        }
    }

    /// stderr が空で終了コードが 0 の場合のみ成功
    pub fn is_success(&self) -> bool {
        self.stderr.is_empty() && self.exit_code == 0
    }

    pub fn failure_message(&self) -> String {
        if self.stderr.is_empty() {
            format!("runtime exited with status {}", self.exit_code)
        } else {
            self.stderr.clone()
        }
    }
}

#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// `<runtime> rm -f <name>` を実行する
    async fn force_remove(&self, name: &ContainerName) -> Result<CommandOutput, RuntimeError>;

    /// ログ用の実行先の説明
    fn describe(&self) -> String;
}

pub fn build_runtime(config: &AppConfig) -> Arc<dyn ContainerRuntime> {
    match &config.mode {
        RuntimeMode::Local => Arc::new(LocalRuntime::new(config.runtime_binary.clone())),
        RuntimeMode::Remote(ssh) => {
            Arc::new(SshRuntime::new(ssh.clone(), config.runtime_binary.clone()))
        }
    }
}

// src/infrastructure/runtime/local.rs

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{CommandOutput, ContainerRuntime, RuntimeError};
use crate::domain::container::ContainerName;

/// ローカルのランタイム CLI をサブプロセスとして実行する
pub struct LocalRuntime {
    binary: String,
}

impl LocalRuntime {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl ContainerRuntime for LocalRuntime {
    async fn force_remove(&self, name: &ContainerName) -> Result<CommandOutput, RuntimeError> {
        debug!(binary = %self.binary, container = %name, "Running local force-remove");

        // シェルを経由しないのでコンテナ名のエスケープは不要
        let output = Command::new(&self.binary)
            .args(["rm", "-f", name.as_str()])
            .output()
            .await?;

        // シグナルで終了した場合は終了コードがない
        let exit_code = output.status.code().unwrap_or(-1);

        Ok(CommandOutput::from_bytes(
            &output.stdout,
            &output.stderr,
            exit_code,
        ))
    }

    fn describe(&self) -> String {
        format!("local ({})", self.binary)
    }
}

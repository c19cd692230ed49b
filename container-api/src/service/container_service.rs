// src/service/container_service.rs

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dto::container_dto::DeleteContainerResponse;
use crate::domain::container::ContainerName;
use crate::error::{AppError, AppResult};
use crate::infrastructure::runtime::ContainerRuntime;
use crate::service::self_destruct_service::SelfDestructService;

pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
    self_destruct: Arc<SelfDestructService>,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, self_destruct: Arc<SelfDestructService>) -> Self {
        Self {
            runtime,
            self_destruct,
        }
    }

    /// コンテナを強制削除する
    ///
    /// 成功時のみ自己削除をスケジュールする。レスポンスは必ずスケジュール前に作成する。
    pub async fn delete_container(&self, name: &ContainerName) -> AppResult<DeleteContainerResponse> {
        info!(
            container = %name,
            runtime = %self.runtime.describe(),
            "Deleting container"
        );

        let output = self.runtime.force_remove(name).await?;

        if !output.is_success() {
            warn!(
                container = %name,
                exit_code = output.exit_code,
                stderr = %output.stderr,
                "Container runtime reported an error"
            );
            return Err(AppError::RuntimeFailure(output.failure_message()));
        }

        info!(container = %name, output = %output.stdout, "Container deleted");
        let response = DeleteContainerResponse::deleted(name, output.stdout);

        self.self_destruct.schedule();

        Ok(response)
    }

    pub fn self_destruct(&self) -> &Arc<SelfDestructService> {
        &self.self_destruct
    }
}

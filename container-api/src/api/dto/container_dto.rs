// src/api/dto/container_dto.rs

use serde::{Deserialize, Serialize};

use crate::domain::container::ContainerName;

/// POST /delete-container/ のリクエストボディ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteContainerRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl DeleteContainerRequest {
    /// ボディが JSON でない、name がない、または空の場合は None
    pub fn container_name(body: &[u8]) -> Option<ContainerName> {
        let request: Self = serde_json::from_slice(body).ok()?;
        request.name.as_deref().and_then(ContainerName::parse)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteContainerResponse {
    pub message: String,
    pub output: String,
}

impl DeleteContainerResponse {
    pub fn deleted(name: &ContainerName, output: impl Into<String>) -> Self {
        Self {
            message: format!("Container '{}' successfully deleted", name),
            output: output.into(),
        }
    }
}

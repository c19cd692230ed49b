// src/api/dto/system_dto.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn online() -> Self {
        Self {
            status: "online".to_string(),
            message: "Docker Container Deletion API is running".to_string(),
        }
    }
}

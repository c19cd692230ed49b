// src/service/mod.rs
pub mod container_service;
pub mod self_destruct_service;

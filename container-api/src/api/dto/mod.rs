// src/api/dto/mod.rs
pub mod container_dto;
pub mod system_dto;

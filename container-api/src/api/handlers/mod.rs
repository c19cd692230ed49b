// src/api/handlers/mod.rs
pub mod container_handler;
pub mod system_handler;

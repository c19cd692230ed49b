// src/domain/mod.rs
pub mod container;

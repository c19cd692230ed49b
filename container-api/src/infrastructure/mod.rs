// src/infrastructure/mod.rs

pub mod runtime;

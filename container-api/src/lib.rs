// src/lib.rs
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod service;

// Re-export commonly used types
pub use api::{create_app, AppState};
pub use config::AppConfig;

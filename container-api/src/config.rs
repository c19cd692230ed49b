// src/config.rs
use std::env;
use std::str::FromStr;
use thiserror::Error;

mod app;
mod self_destruct;
mod ssh;

pub use app::{AppConfig, RuntimeMode};
pub use self_destruct::{SelfDestructConfig, Termination, DEFAULT_OWNED_FILES};
pub use ssh::{SshAuth, SshConfig};

/// 設定読み込みエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// 空文字列は未設定として扱う
pub(crate) fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env_var(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

pub(crate) fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env_var(key) {
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}

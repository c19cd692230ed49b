use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::{env_var, parse_env, parse_flag, ConfigError};

/// デプロイ時に配置されるサービス自身のファイル
pub const DEFAULT_OWNED_FILES: &[&str] = &[".env", "Dockerfile", "docker-compose.yml", "requirements.txt"];

/// 自己削除後のプロセス終了方法
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// サーバーを graceful shutdown させ、main から通常終了する
    Graceful,
    /// std::process::exit で即座に終了する（終了処理はスキップされる）
    Abrupt,
}

impl FromStr for Termination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graceful" => Ok(Self::Graceful),
            "abrupt" | "exit" => Ok(Self::Abrupt),
            other => Err(format!("unknown termination mode: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SelfDestructConfig {
    pub enabled: bool,
    pub delay: Duration,
    /// 相対パスのファイルはこのディレクトリを基準に解決する
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
    pub remove_directory: bool,
    pub termination: Termination,
}

impl SelfDestructConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let enabled = parse_flag("SELF_DESTRUCT_ENABLED", false)?;
        let delay = Duration::from_secs(parse_env("SELF_DESTRUCT_DELAY_SECS", 3u64)?);

        let directory = match env_var("SELF_DESTRUCT_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().map_err(|e| ConfigError::Invalid {
                key: "SELF_DESTRUCT_DIR",
                value: e.to_string(),
            })?,
        };

        let files = match env_var("SELF_DESTRUCT_FILES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => default_owned_files(),
        };

        let remove_directory = parse_flag("SELF_DESTRUCT_REMOVE_DIR", false)?;

        let termination = match env_var("SELF_DESTRUCT_TERMINATION") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    key: "SELF_DESTRUCT_TERMINATION",
                    value,
                })?,
            None => Termination::Graceful,
        };

        Self {
            enabled,
            delay,
            directory,
            files,
            remove_directory,
            termination,
        }
        .validate()
    }

    /// abrupt 終了は遅延なしだとレスポンス送信前にプロセスが消えるため拒否する
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.enabled && self.termination == Termination::Abrupt && self.delay.is_zero() {
            return Err(ConfigError::Invalid {
                key: "SELF_DESTRUCT_DELAY_SECS",
                value: "0 (abrupt termination requires a delay)".to_string(),
            });
        }
        Ok(self)
    }

    /// 自己削除を行わない設定
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            delay: Duration::ZERO,
            directory: PathBuf::from("."),
            files: Vec::new(),
            remove_directory: false,
            termination: Termination::Graceful,
        }
    }

    pub fn resolved_files(&self) -> Vec<PathBuf> {
        // join は絶対パスをそのまま返す
        self.files.iter().map(|f| self.directory.join(f)).collect()
    }
}

fn default_owned_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = DEFAULT_OWNED_FILES.iter().map(PathBuf::from).collect();
    if let Ok(exe) = env::current_exe() {
        files.push(exe);
    }
    files
}

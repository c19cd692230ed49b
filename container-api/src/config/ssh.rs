use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::{env_var, parse_env, ConfigError};

/// SSH 認証方式
///
/// 設定読み込み時に一度だけ決定する。鍵ファイルが存在すれば鍵認証を優先する。
#[derive(Clone, PartialEq, Eq)]
pub enum SshAuth {
    Password(String),
    PrivateKey(PathBuf),
}

impl SshAuth {
    pub fn select(key_path: Option<PathBuf>, password: Option<String>) -> Result<Self, ConfigError> {
        match (key_path, password) {
            (Some(path), _) if path.is_file() => Ok(Self::PrivateKey(path)),
            (_, Some(password)) => Ok(Self::Password(password)),
            (Some(path), None) => Err(ConfigError::Invalid {
                key: "SSH_KEY_PATH",
                value: path.display().to_string(),
            }),
            (None, None) => Err(ConfigError::Missing("REMOTE_PASSWORD or SSH_KEY_PATH")),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::Password(_) => "password",
            Self::PrivateKey(_) => "publickey",
        }
    }
}

// パスワードをログに出さない
impl fmt::Debug for SshAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password(_) => f.write_str("Password(***)"),
            Self::PrivateKey(path) => f.debug_tuple("PrivateKey").field(path).finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SshConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth: SshAuth,
    pub connect_timeout: Duration,
}

impl SshConfig {
    /// REMOTE_HOST が未設定ならローカル実行 (None)
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(host) = env_var("REMOTE_HOST") else {
            return Ok(None);
        };

        let port = parse_env("REMOTE_PORT", 22u16)?;
        let username = env_var("REMOTE_USERNAME").ok_or(ConfigError::Missing("REMOTE_USERNAME"))?;
        let auth = SshAuth::select(
            env_var("SSH_KEY_PATH").map(PathBuf::from),
            env_var("REMOTE_PASSWORD"),
        )?;
        let connect_timeout = Duration::from_secs(parse_env("SSH_CONNECT_TIMEOUT_SECS", 10u64)?);

        Ok(Some(Self {
            host,
            port,
            username,
            auth,
            connect_timeout,
        }))
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

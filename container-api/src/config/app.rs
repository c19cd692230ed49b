use super::{env_var, parse_env, ConfigError, SelfDestructConfig, SshConfig};

/// コンテナ削除コマンドの実行先
#[derive(Clone, Debug)]
pub enum RuntimeMode {
    Local,
    Remote(SshConfig),
}

impl RuntimeMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote(_) => "remote",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// docker 互換 CLI のバイナリ名
    pub runtime_binary: String,
    pub mode: RuntimeMode,
    pub self_destruct: SelfDestructConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        let mode = match SshConfig::from_env()? {
            Some(ssh) => RuntimeMode::Remote(ssh),
            None => RuntimeMode::Local,
        };

        Ok(Self {
            environment: env_var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: env_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_env("PORT", 5000u16)?,
            runtime_binary: env_var("CONTAINER_RUNTIME").unwrap_or_else(|| "docker".to_string()),
            mode,
            self_destruct: SelfDestructConfig::from_env()?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// テスト用の設定を作成
    pub fn for_testing() -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            runtime_binary: "docker".to_string(),
            mode: RuntimeMode::Local,
            self_destruct: SelfDestructConfig::disabled(),
        }
    }
}

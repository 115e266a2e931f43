#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::openai::DEFAULT_BASE_URL;
use crate::core::study::DEFAULT_TEMPERATURE;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_non_empty_secret, validate_non_empty_string, validate_positive_number,
    validate_range, validate_required_field, validate_url, Validate,
};
use std::path::{Path, PathBuf};
use toml_config::FileConfig;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

/// 命令列覆蓋值，優先權最高
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
}

/// 啟動時建立一次，之後唯讀共用
#[derive(Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// 只讀取環境變數；`.env` 需先由 `load_dotenv` 載入
    pub fn from_env() -> Result<Self> {
        Self::load(None, &ConfigOverrides::default())
    }

    /// 預設值 < TOML 檔 < 環境變數 < 命令列
    pub fn load(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let file = match config_file {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                FileConfig::from_file(path)?
            }
            None => FileConfig::default(),
        };

        Self::from_sources(&file, |name| std::env::var(name).ok(), overrides)
    }

    pub fn from_sources<F>(file: &FileConfig, lookup: F, overrides: &ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空字串視同未設定
        let env = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let server = file.server();
        let openai = file.openai();

        let api_key = env(ENV_API_KEY).or(openai.api_key);
        let api_key = validate_required_field(ENV_API_KEY, &api_key)?.clone();

        let model = overrides
            .model
            .clone()
            .or_else(|| env(ENV_MODEL))
            .or(openai.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = env(ENV_BASE_URL)
            .or(openai.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let temperature = match env(ENV_TEMPERATURE) {
            Some(raw) => parse_value(ENV_TEMPERATURE, &raw)?,
            None => openai.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        let host = overrides
            .host
            .clone()
            .or_else(|| env(ENV_HOST))
            .or(server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match (overrides.port, env(ENV_PORT)) {
            (Some(port), _) => port,
            (None, Some(raw)) => parse_value(ENV_PORT, &raw)?,
            (None, None) => server.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            temperature,
            host,
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 載入目前目錄（或上層）的 `.env`，找不到檔案回傳 `Ok(None)`
///
/// 須在初始化 logger 前呼叫，`.env` 裡的 `RUST_LOG` 才會生效。
/// 已存在的環境變數不會被覆蓋。
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    dotenv_result(dotenv::dotenv())
}

pub fn load_dotenv_from(path: &Path) -> Result<Option<PathBuf>> {
    dotenv_result(dotenv::from_path(path).map(|_| path.to_path_buf()))
}

fn dotenv_result(result: std::result::Result<PathBuf, dotenv::Error>) -> Result<Option<PathBuf>> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(AppError::ConfigError {
            message: format!("Cannot load .env file: {}", e),
        }),
    }
}

fn parse_value<T>(field: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| AppError::InvalidConfigValueError {
        field: field.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_secret(ENV_API_KEY, &self.api_key)?;
        validate_non_empty_string(ENV_MODEL, &self.model)?;
        validate_url(ENV_BASE_URL, &self.base_url)?;
        validate_range(ENV_TEMPERATURE, self.temperature, 0.0, 2.0)?;
        validate_non_empty_string(ENV_HOST, &self.host)?;
        validate_positive_number(ENV_PORT, usize::from(self.port), 1)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

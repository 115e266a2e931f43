use crate::utils::error::{AppError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 選用的 TOML 設定檔
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8000
///
/// [openai]
/// api_key = "${OPENAI_API_KEY}"
/// model = "gpt-4.1-mini"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server: Option<ServerSection>,
    pub openai: Option<OpenAiSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiSection {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
}

impl std::fmt::Debug for OpenAiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| AppError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，`${VAR}` 由環境變數取代
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse_with(content, |name| std::env::var(name).ok())
    }

    pub fn parse_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table: toml::Table = toml::from_str(content).map_err(parse_error)?;

        // 先解析再替換，註解與鍵名不參與替換，值也不需跳脫
        let mut value = toml::Value::Table(table);
        Self::substitute_env_vars(&mut value, &lookup)?;

        value.try_into().map_err(parse_error)
    }

    /// 替換字串值中的 `${VAR_NAME}`；找不到的變數視為錯誤
    fn substitute_env_vars<F>(value: &mut toml::Value, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: e.to_string(),
        })?;

        let mut missing = Vec::new();
        substitute_in_value(value, &re, lookup, &mut missing);

        if !missing.is_empty() {
            return Err(AppError::ConfigValidationError {
                field: "toml_substitution".to_string(),
                message: format!("Environment variables not set: {}", missing.join(", ")),
            });
        }

        Ok(())
    }

    pub fn server(&self) -> ServerSection {
        self.server.clone().unwrap_or_default()
    }

    pub fn openai(&self) -> OpenAiSection {
        self.openai.clone().unwrap_or_default()
    }
}

fn parse_error(e: impl std::fmt::Display) -> AppError {
    AppError::ConfigValidationError {
        field: "toml_parsing".to_string(),
        message: format!("TOML parsing error: {}", e),
    }
}

fn substitute_in_value<F>(value: &mut toml::Value, re: &Regex, lookup: &F, missing: &mut Vec<String>)
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        toml::Value::String(text) => {
            if re.is_match(text) {
                let replaced = re
                    .replace_all(text, |caps: &regex::Captures| {
                        let var_name = &caps[1];
                        lookup(var_name).unwrap_or_else(|| {
                            missing.push(var_name.to_string());
                            String::new()
                        })
                    })
                    .into_owned();
                *text = replaced;
            }
        }
        toml::Value::Array(items) => {
            for item in items.iter_mut() {
                substitute_in_value(item, re, lookup, missing);
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                substitute_in_value(item, re, lookup, missing);
            }
        }
        _ => {}
    }
}

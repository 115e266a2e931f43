use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Upstream API error{}: {message}", status_suffix(.status))]
    UpstreamError {
        status: Option<u16>,
        message: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// 錯誤類別，用於日誌與退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Network,
    Upstream,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::UpstreamError {
            status,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ApiError(_) => ErrorCategory::Network,
            Self::UpstreamError { .. } | Self::SerializationError(_) => ErrorCategory::Upstream,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 是否為呼叫端輸入造成的錯誤
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingConfigError { field } if field == "OPENAI_API_KEY" => {
                "Create a .env file next to the binary with:\nOPENAI_API_KEY=your_key_here"
                    .to_string()
            }
            Self::MissingConfigError { field } => {
                format!("Set {} in the environment, .env file or config file", field)
            }
            Self::InvalidConfigValueError { field, .. }
            | Self::ConfigValidationError { field, .. } => {
                format!("Check the value of {}", field)
            }
            Self::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            Self::ValidationError { .. } => {
                "Send a JSON body like {\"text\": \"...\"} with 1 to 12000 characters".to_string()
            }
            Self::ApiError(_) => {
                "Check network connectivity and OPENAI_BASE_URL".to_string()
            }
            Self::UpstreamError { status: Some(401), .. } => {
                "Check that OPENAI_API_KEY is valid".to_string()
            }
            Self::UpstreamError { status: Some(429), .. } => {
                "Rate limited or out of quota; wait and try again".to_string()
            }
            Self::UpstreamError { .. } | Self::SerializationError(_) => {
                "Check OPENAI_MODEL and the upstream API status".to_string()
            }
            Self::IoError(_) => "Check file permissions and paths".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Validation => format!("Invalid request: {}", self),
            ErrorCategory::Network => format!("Could not reach the AI service: {}", self),
            ErrorCategory::Upstream => format!("The AI service returned an error: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

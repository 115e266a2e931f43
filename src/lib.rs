pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::adapters::OpenAiClient;
pub use crate::app::{build_router, AppState};
pub use crate::config::{AppConfig, ConfigOverrides};
pub use crate::core::{StudyMode, StudyService};
pub use crate::utils::error::{AppError, Result};

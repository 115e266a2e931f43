use clap::Parser;
use std::sync::Arc;
use study_aid::app::{self, AppState};
use study_aid::config::load_dotenv;
use study_aid::utils::error::{AppError, ErrorSeverity};
use study_aid::utils::{logger, validation::Validate};
use study_aid::{AppConfig, CliArgs, OpenAiClient, StudyService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 先載入 .env，RUST_LOG 才能影響日誌等級
    let dotenv = load_dotenv();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting study-aid backend");
    match dotenv {
        Ok(Some(path)) => tracing::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("⚠️ Ignoring .env: {}", e),
    }
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入並驗證配置
    let config = match AppConfig::load(args.config.as_deref(), &args.overrides())
        .and_then(|config| config.validate().map(|_| config))
    {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    tracing::info!("🤖 Model: {}", config.model);
    tracing::debug!("Config: {:?}", config);

    let client = OpenAiClient::new(
        config.api_key.clone(),
        config.model.clone(),
        &config.base_url,
    );
    let service = StudyService::with_temperature(Arc::new(client), config.temperature);

    if let Err(e) = app::serve(&config, AppState::new(service)).await {
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &AppError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

//! 連線檢查：用固定提示呼叫一次上游 API，印出模型與輸出。

use study_aid::config::load_dotenv;
use study_aid::domain::model::CompletionRequest;
use study_aid::domain::ports::ChatCompletion;
use study_aid::domain::prompts::{
    CONNECTIVITY_CHECK_INPUT, CONNECTIVITY_CHECK_INSTRUCTIONS, CONNECTIVITY_CHECK_MAX_TOKENS,
};
use study_aid::utils::validation::Validate;
use study_aid::{AppConfig, OpenAiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();

    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = dotenv {
        tracing::warn!("⚠️ Ignoring .env: {}", e);
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    config.validate()?;

    let client = OpenAiClient::new(
        config.api_key.clone(),
        config.model.clone(),
        &config.base_url,
    );

    let request = CompletionRequest::new(
        CONNECTIVITY_CHECK_INSTRUCTIONS,
        CONNECTIVITY_CHECK_INPUT,
        CONNECTIVITY_CHECK_MAX_TOKENS,
        0.0,
    );
    let out = client.complete(request).await?;

    println!("Model: {}", client.model());
    println!("OUTPUT: {}", if out.is_empty() { "(empty)" } else { out.as_str() });

    Ok(())
}

use crate::domain::format::{is_well_formed_quiz, is_well_formed_summary, normalize_text};
use crate::domain::model::{CompletionRequest, StudyMode, TextInput, MAX_TEXT_CHARS};
use crate::domain::ports::ChatCompletion;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;

pub const DEFAULT_TEMPERATURE: f64 = 0.4;

/// 驗證、正規化輸入，套用模式模板後呼叫上游模型
#[derive(Clone)]
pub struct StudyService {
    client: Arc<dyn ChatCompletion>,
    temperature: f64,
}

impl StudyService {
    pub fn new(client: Arc<dyn ChatCompletion>) -> Self {
        Self::with_temperature(client, DEFAULT_TEMPERATURE)
    }

    pub fn with_temperature(client: Arc<dyn ChatCompletion>, temperature: f64) -> Self {
        Self {
            client,
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// 驗證原始輸入並回傳正規化後的文字
    pub fn prepare_text(input: &TextInput) -> Result<String> {
        let raw = input
            .text
            .as_deref()
            .ok_or_else(|| AppError::validation("No text provided"))?;

        let char_count = raw.chars().count();
        if char_count > MAX_TEXT_CHARS {
            return Err(AppError::validation(format!(
                "Text is too long ({} characters, max {})",
                char_count, MAX_TEXT_CHARS
            )));
        }

        let cleaned = normalize_text(raw);
        if cleaned.is_empty() {
            return Err(AppError::validation("No text provided"));
        }

        Ok(cleaned)
    }

    pub fn build_request(&self, mode: StudyMode, text: &str) -> CompletionRequest {
        CompletionRequest::new(mode.instructions(), text, mode.max_tokens(), self.temperature)
    }

    pub async fn run(&self, mode: StudyMode, input: &TextInput) -> Result<String> {
        let text = Self::prepare_text(input)?;
        tracing::info!("📝 {} request: {} chars", mode, text.chars().count());

        let request = self.build_request(mode, &text);
        let result = self.client.complete(request).await?;

        if !Self::has_expected_shape(mode, &result) {
            tracing::warn!("⚠️ {} output does not match the requested format", mode);
            tracing::debug!("Unexpected {} output: {:?}", mode, result);
        }

        tracing::info!("✅ {} completed: {} chars", mode, result.chars().count());
        Ok(result)
    }

    fn has_expected_shape(mode: StudyMode, output: &str) -> bool {
        match mode {
            StudyMode::Explain => !output.is_empty(),
            StudyMode::Summarize => is_well_formed_summary(output),
            StudyMode::Quiz => is_well_formed_quiz(output),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// 單次請求允許的最大字元數
pub const MAX_TEXT_CHARS: usize = 12_000;

/// 三種學習輔助模式，各自對應一個 POST 路由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudyMode {
    Explain,
    Summarize,
    Quiz,
}

impl StudyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyMode::Explain => "explain",
            StudyMode::Summarize => "summarize",
            StudyMode::Quiz => "quiz",
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 請求內容；`text` 設為 Option，缺欄位時交由驗證回報錯誤
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextInput {
    #[serde(default)]
    pub text: Option<String>,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// 回應只會是 `{"result": ...}` 或 `{"error": ...}` 其中之一
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyResponse {
    Result(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// 送往上游模型的一次補全請求（與傳輸格式無關）
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    pub fn new(instructions: &str, user_text: &str, max_tokens: u32, temperature: f64) -> Self {
        Self {
            messages: vec![ChatMessage::system(instructions), ChatMessage::user(user_text)],
            max_tokens,
            temperature,
        }
    }
}

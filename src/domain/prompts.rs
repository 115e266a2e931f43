use crate::domain::model::StudyMode;

const EXPLAIN_INSTRUCTIONS: &str = "\
You are a helpful tutor for students.
Explain the user's selected text in very simple, student-friendly language.
Rules:
- Keep it short (6-10 sentences)
- Use plain words
- If the text includes a formula or term, explain what it means
- Output ONLY the explanation text
";

const SUMMARIZE_INSTRUCTIONS: &str = "\
You are a helpful tutor for students.
Summarize the user's selected text.
Rules:
- Output EXACTLY 3 to 5 bullet points
- Each bullet must be one short line
- Max 5 bullets
- Output ONLY the bullets (no title, no intro)
Bullet format example:
- Point one
- Point two
";

const QUIZ_INSTRUCTIONS: &str = "\
You are a quiz maker for students.
Create EXACTLY 3 multiple-choice questions based ONLY on the user's selected text.
Rules:
- Each question must have 4 options labeled A, B, C, D
- After options, include: Answer: <LETTER>
- Keep questions easy and directly from the text
- Output ONLY the quiz text, in this exact structure:
Q1) ...?
A) ...
B) ...
C) ...
D) ...
Answer: A

Q2) ...?
... and so on until Q3
";

/// 連線檢查用的固定提示
pub const CONNECTIVITY_CHECK_INSTRUCTIONS: &str =
    "Reply with exactly two words: OK WORKS. Output only those two words.";
pub const CONNECTIVITY_CHECK_INPUT: &str = "Test";
pub const CONNECTIVITY_CHECK_MAX_TOKENS: u32 = 16;

impl StudyMode {
    /// 系統提示（instruction template）
    pub fn instructions(&self) -> &'static str {
        match self {
            StudyMode::Explain => EXPLAIN_INSTRUCTIONS,
            StudyMode::Summarize => SUMMARIZE_INSTRUCTIONS,
            StudyMode::Quiz => QUIZ_INSTRUCTIONS,
        }
    }

    /// 每種模式的 token 上限
    pub fn max_tokens(&self) -> u32 {
        match self {
            StudyMode::Explain => 320,
            StudyMode::Summarize => 220,
            StudyMode::Quiz => 420,
        }
    }
}

//! 輸入正規化與模型輸出格式檢查。
//!
//! 格式檢查只用來記錄警告，模型輸出本身原樣回傳。

pub const QUIZ_QUESTION_COUNT: usize = 3;
pub const QUIZ_OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];
pub const SUMMARY_MIN_BULLETS: usize = 3;
pub const SUMMARY_MAX_BULLETS: usize = 5;

// 題目一行 + 四個選項 + 答案一行
const QUIZ_BLOCK_LINES: usize = 1 + QUIZ_OPTION_LABELS.len() + 1;

/// 去掉頭尾空白，並把內部連續空白壓成單一空格
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn content_lines(output: &str) -> Vec<&str> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// 3 到 5 行，每行以 `- ` 開頭
pub fn is_well_formed_summary(output: &str) -> bool {
    let lines = content_lines(output);
    (SUMMARY_MIN_BULLETS..=SUMMARY_MAX_BULLETS).contains(&lines.len())
        && lines
            .iter()
            .all(|line| line.strip_prefix("- ").is_some_and(|rest| !rest.trim().is_empty()))
}

/// 恰好 3 題，每題 A-D 四個選項加一行 `Answer: <LETTER>`
pub fn is_well_formed_quiz(output: &str) -> bool {
    let lines = content_lines(output);
    if lines.len() != QUIZ_QUESTION_COUNT * QUIZ_BLOCK_LINES {
        return false;
    }

    lines
        .chunks(QUIZ_BLOCK_LINES)
        .enumerate()
        .all(|(index, block)| is_quiz_block(index + 1, block))
}

fn is_quiz_block(number: usize, block: &[&str]) -> bool {
    let (question, rest) = match block.split_first() {
        Some(parts) => parts,
        None => return false,
    };
    let (answer, options) = match rest.split_last() {
        Some(parts) => parts,
        None => return false,
    };

    let question_ok = question
        .strip_prefix(&format!("Q{})", number))
        .is_some_and(|text| !text.trim().is_empty());

    let options_ok = options.len() == QUIZ_OPTION_LABELS.len()
        && QUIZ_OPTION_LABELS
            .iter()
            .zip(options)
            .all(|(label, line)| has_label(line, *label));

    let answer_ok = answer
        .strip_prefix("Answer:")
        .map(str::trim)
        .is_some_and(|letter| {
            let mut chars = letter.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if QUIZ_OPTION_LABELS.contains(&c))
        });

    question_ok && options_ok && answer_ok
}

fn has_label(line: &str, label: char) -> bool {
    line.strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(')'))
        .is_some_and(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_QUIZ: &str = "\
Q1) What do plants need for photosynthesis?
A) Sunlight
B) Sand
C) Salt
D) Smoke
Answer: A

Q2) Where does photosynthesis happen?
A) Roots
B) Chloroplasts
C) Bark
D) Seeds
Answer: B

Q3) What gas do plants release?
A) Nitrogen
B) Helium
C) Oxygen
D) Argon
Answer: C";

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hello   world  \n"), "hello world");
        assert_eq!(normalize_text("a\t\tb\r\nc"), "a b c");
        assert_eq!(normalize_text(" \n\t "), "");
    }

    #[test]
    fn test_summary_shape() {
        assert!(is_well_formed_summary("- one\n- two\n- three"));
        assert!(is_well_formed_summary("- one\n- two\n- three\n- four\n- five\n"));
        assert!(!is_well_formed_summary("- one\n- two"));
        assert!(!is_well_formed_summary("- 1\n- 2\n- 3\n- 4\n- 5\n- 6"));
        assert!(!is_well_formed_summary("Summary:\n- one\n- two\n- three"));
        assert!(!is_well_formed_summary("* one\n* two\n* three"));
    }

    #[test]
    fn test_quiz_shape() {
        assert!(is_well_formed_quiz(GOOD_QUIZ));
    }

    #[test]
    fn test_quiz_rejects_missing_question() {
        let two_questions: String = GOOD_QUIZ.lines().take(13).collect::<Vec<_>>().join("\n");
        assert!(!is_well_formed_quiz(&two_questions));
    }

    #[test]
    fn test_quiz_rejects_bad_answer_line() {
        let bad = GOOD_QUIZ.replace("Answer: C", "Answer: E");
        assert!(!is_well_formed_quiz(&bad));

        let bad = GOOD_QUIZ.replace("Answer: B", "The answer is B");
        assert!(!is_well_formed_quiz(&bad));
    }

    #[test]
    fn test_quiz_rejects_out_of_order_options() {
        let bad = GOOD_QUIZ.replacen("B) Sand", "E) Sand", 1);
        assert!(!is_well_formed_quiz(&bad));
    }
}

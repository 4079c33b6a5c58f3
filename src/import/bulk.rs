//! Bulk import of a pasted multi-question text.
//!
//! Blocks are separated by blank lines. The first line of a block is the
//! prompt, every further line is an option; a leading `+` or `*` marks the
//! correct one.

use tracing::debug;

use super::markers::{clean_prompt, split_marked_option};
use crate::models::Question;

/// Smallest useful block: a prompt and one option.
const MIN_BLOCK_LINES: usize = 2;

/// Split text into blocks of non-empty trimmed lines. Any run of
/// whitespace-only lines separates two blocks.
fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Option<Question> {
    let (prompt, raw_options) = lines.split_first()?;
    if lines.len() < MIN_BLOCK_LINES {
        return None;
    }

    let mut options = Vec::with_capacity(raw_options.len());
    let mut correct_index = 0;
    for (idx, raw) in raw_options.iter().enumerate() {
        let (is_correct, text) = split_marked_option(raw);
        if is_correct {
            correct_index = idx;
        }
        options.push(text.to_string());
    }

    Some(Question::new(clean_prompt(prompt), options, correct_index))
}

/// Parse every block of `raw` into a question, in order. Blocks too short
/// to hold a prompt and an option are skipped.
pub fn import_questions(raw: &str) -> Vec<Question> {
    split_blocks(raw)
        .iter()
        .enumerate()
        .filter_map(|(block_idx, lines)| {
            let question = parse_block(lines);
            if question.is_none() {
                debug!(block = block_idx + 1, lines = lines.len(), "skipping short block");
            }
            question
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_sample() {
        let questions = import_questions("1. Сколько будет 2+2?\nТри\n+Четыре\nПять\n");
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.text, "Сколько будет 2+2?");
        assert_eq!(q.options, vec!["Три", "Четыре", "Пять"]);
        assert_eq!(q.correct_index, 1);
        assert_eq!(q.image, None);
    }

    #[test]
    fn test_unmarked_blocks_default_to_first_option() {
        let raw = "Q1\nA\nB\n\nQ2\nC\nD\nE";
        let questions = import_questions(raw);
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.correct_index == 0));
        assert_eq!(questions[1].options, vec!["C", "D", "E"]);
    }

    #[test]
    fn test_three_blocks_make_three_questions() {
        let raw = "1. One\na) x\nb) y\n\n2. Two\nx\ny\nz\nw\n\n\n   \n3. Three\n- x\n- y";
        let questions = import_questions(raw);
        let prompts: Vec<_> = questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(prompts, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_mark_position_wins_whatever_the_enumeration() {
        let raw = "Вопрос 1: Столица Франции?\nа) Лондон\nб) Берлин\n*в) Париж\nг) Рим";
        let questions = import_questions(raw);
        assert_eq!(questions[0].text, "Столица Франции?");
        assert_eq!(questions[0].options, vec!["Лондон", "Берлин", "Париж", "Рим"]);
        assert_eq!(questions[0].correct_index, 2);
    }

    #[test]
    fn test_last_mark_wins() {
        let questions = import_questions("Q\n+A\nB\n*C\nD");
        assert_eq!(questions[0].correct_index, 2);
    }

    #[test]
    fn test_short_blocks_are_skipped() {
        let raw = "Lonely line\n\nQ\nA\n\nanother lonely";
        let questions = import_questions(raw);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["A"]);
    }

    #[test]
    fn test_stray_blank_line_splits_question() {
        let raw = "Q\nA\n\nB\nC";
        let questions = import_questions(raw);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].text, "B");
        assert_eq!(questions[1].options, vec!["C"]);
    }

    #[test]
    fn test_empty_options_are_kept() {
        let questions = import_questions("Q\na)\n+b)\nc) real");
        assert_eq!(questions[0].options, vec!["", "", "real"]);
        assert_eq!(questions[0].correct_index, 1);
    }

    #[test]
    fn test_windows_line_endings() {
        let questions = import_questions("1. Q\r\nA\r\n+B\r\n\r\n2. R\r\nC\r\nD\r\n");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].options, vec!["A", "B"]);
        assert_eq!(questions[0].correct_index, 1);
    }

    #[test]
    fn test_garbage_imports_nothing() {
        assert!(import_questions("").is_empty());
        assert!(import_questions("\n\n   \n").is_empty());
        assert!(import_questions("one\n\ntwo\n\nthree").is_empty());
    }

    #[test]
    fn test_each_question_gets_its_own_id() {
        let questions = import_questions("Q\nA\nB\n\nQ\nA\nB");
        assert_ne!(questions[0].id, questions[1].id);
    }
}

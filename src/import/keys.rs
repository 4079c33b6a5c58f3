//! Answer-key backfill: `"1-А, 2-Б; 3 - В"` onto existing questions.

use phf::phf_map;
use tracing::debug;

use crate::models::Question;

/// Answer letter to option index. Cyrillic and Latin spellings share slots.
static LETTER_INDEX: phf::Map<char, usize> = phf_map! {
    'а' => 0, 'a' => 0,
    'б' => 1, 'b' => 1,
    'в' => 2, 'c' => 2, 'v' => 2,
    'г' => 3, 'd' => 3, 'g' => 3,
    'д' => 4, 'e' => 4,
};

const FRAGMENT_SEPARATORS: [char; 3] = [',', ';', '\n'];

/// One parsed `<number><sep><letter>` fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerKey {
    /// 1-based, as written.
    pub number: usize,
    pub letter: char,
}

impl AnswerKey {
    pub fn question_index(&self) -> Option<usize> {
        self.number.checked_sub(1)
    }

    pub fn option_index(&self) -> Option<usize> {
        letter_index(self.letter)
    }
}

/// Look up an answer letter, ignoring case.
pub fn letter_index(letter: char) -> Option<usize> {
    letter
        .to_lowercase()
        .next()
        .and_then(|lower| LETTER_INDEX.get(&lower).copied())
}

fn is_key_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c.to_lowercase().next(), Some('а'..='я'))
}

fn is_key_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '.' | ':')
}

/// Parse a single fragment. Anything after the letter is ignored.
pub fn parse_fragment(fragment: &str) -> Option<AnswerKey> {
    let fragment = fragment.trim();
    let rest = fragment.trim_start_matches(|c: char| c.is_ascii_digit());
    let number = fragment[..fragment.len() - rest.len()].parse().ok()?;

    let after_sep = rest.trim_start_matches(is_key_separator);
    if after_sep.len() == rest.len() {
        return None;
    }

    let letter = after_sep.chars().next().filter(|c| is_key_letter(*c))?;
    Some(AnswerKey { number, letter })
}

/// Split key text into trimmed, non-empty fragments.
fn fragments(key_text: &str) -> impl Iterator<Item = &str> {
    key_text
        .split(FRAGMENT_SEPARATORS)
        .map(str::trim)
        .filter(|f| !f.is_empty())
}

/// Apply every valid key fragment to `questions`, returning how many were
/// applied. Fragments that do not parse or point outside the questions or
/// their options are skipped.
pub fn apply_keys(key_text: &str, questions: &mut [Question]) -> usize {
    let mut applied = 0;

    for fragment in fragments(key_text) {
        let Some(key) = parse_fragment(fragment) else {
            debug!(fragment, "unparseable key fragment");
            continue;
        };

        let target = key.question_index().and_then(|idx| questions.get_mut(idx));
        match (target, key.option_index()) {
            (Some(question), Some(option)) if option < question.options.len() => {
                question.correct_index = option;
                applied += 1;
            }
            _ => debug!(fragment, ?key, "key does not fit any question"),
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(option_counts: &[usize]) -> Vec<Question> {
        option_counts
            .iter()
            .map(|&n| Question::new("Q", (0..n).map(|i| format!("opt {i}")).collect(), 0))
            .collect()
    }

    #[test]
    fn test_mixed_separators() {
        let mut qs = questions(&[3, 3, 3]);
        let applied = apply_keys("1-А, 2-Б; 3 - В", &mut qs);
        assert_eq!(applied, 3);
        let indexes: Vec<_> = qs.iter().map(|q| q.correct_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_key() {
        let mut qs = questions(&[4, 2]);
        assert_eq!(apply_keys("2-Б", &mut qs), 1);
        assert_eq!(qs[1].correct_index, 1);
        assert_eq!(qs[0].correct_index, 0);
    }

    #[test]
    fn test_unknown_letter_is_skipped() {
        let mut qs = questions(&[4, 4]);
        assert_eq!(apply_keys("2-Ъ", &mut qs), 0);
        assert_eq!(qs[1].correct_index, 0);
    }

    #[test]
    fn test_idempotent() {
        let mut qs = questions(&[4, 4, 4]);
        let keys = "1-Г\n2.в\n3: b";
        let first = apply_keys(keys, &mut qs);
        let after_first: Vec<_> = qs.iter().map(|q| q.correct_index).collect();
        let second = apply_keys(keys, &mut qs);
        let after_second: Vec<_> = qs.iter().map(|q| q.correct_index).collect();
        assert_eq!(first, 3);
        assert_eq!(first, second);
        assert_eq!(after_first, vec![3, 2, 1]);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_out_of_range_is_skipped() {
        let mut qs = questions(&[2, 3]);
        // question 3 does not exist, question 1 has no third option, 0 is not a question
        assert_eq!(apply_keys("3-А, 1-В, 0-А, 2-Д", &mut qs), 0);
        assert!(qs.iter().all(|q| q.correct_index == 0));
    }

    #[test]
    fn test_latin_and_case_insensitive() {
        let mut qs = questions(&[5, 5, 5, 5]);
        assert_eq!(apply_keys("1 e, 2-V, 3-g, 4-D", &mut qs), 4);
        let indexes: Vec<_> = qs.iter().map(|q| q.correct_index).collect();
        assert_eq!(indexes, vec![4, 2, 3, 3]);
    }

    #[test]
    fn test_malformed_fragments() {
        assert_eq!(parse_fragment("А-1"), None);
        assert_eq!(parse_fragment("12"), None);
        assert_eq!(parse_fragment("1А"), None);
        assert_eq!(parse_fragment("1 - 2"), None);
        assert_eq!(parse_fragment("-"), None);
    }

    #[test]
    fn test_fragment_trailing_text_is_ignored() {
        let key = parse_fragment("12 -- Бета").unwrap();
        assert_eq!(key.number, 12);
        assert_eq!(key.letter, 'Б');
        assert_eq!(key.question_index(), Some(11));
        assert_eq!(key.option_index(), Some(1));
    }

    #[test]
    fn test_no_break_space_separator() {
        let mut qs = questions(&[3, 3]);
        assert_eq!(apply_keys("1\u{00A0}-\u{00A0}Б, 2\u{2009}В", &mut qs), 2);
        assert_eq!(qs[0].correct_index, 1);
        assert_eq!(qs[1].correct_index, 2);
    }

    #[test]
    fn test_letter_table() {
        assert_eq!(letter_index('А'), Some(0));
        assert_eq!(letter_index('C'), Some(2));
        assert_eq!(letter_index('е'), None);
        assert_eq!(letter_index('z'), None);
    }

    #[test]
    fn test_garbage_applies_nothing() {
        let mut qs = questions(&[3]);
        assert_eq!(apply_keys(",,;\n  \n", &mut qs), 0);
        assert_eq!(apply_keys("ответы: все верные", &mut qs), 0);
    }
}

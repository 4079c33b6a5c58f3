//! Leading-marker grammar shared by the importers.
//!
//! Each marker kind is an ordered list of strip rules. The first rule
//! that matches consumes its marker and the rest is returned; at most one
//! rule fires per list. Option lines run the correctness marker first and
//! the enumeration list second, always on what the previous step left.

/// A strip rule returns the text after its marker, or `None` if the line
/// does not start with that marker.
type Rule = fn(&str) -> Option<&str>;

/// Prompt numbering: `12.` / `12)` or `Вопрос 12:`.
const PROMPT_RULES: &[Rule] = &[numbered, question_word];

/// Option enumeration: `a)`, `Б.`, `3)`, or a leading dash.
const ENUMERATION_RULES: &[Rule] = &[labelled, dashed];

const QUESTION_WORD: &str = "вопрос";

const CORRECT_MARKERS: [char; 2] = ['+', '*'];

fn apply_first<'a>(line: &'a str, rules: &[Rule]) -> &'a str {
    rules
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or(line)
        .trim()
}

fn digits(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    (rest.len() < line.len()).then_some(rest)
}

fn numbered(line: &str) -> Option<&str> {
    digits(line)?.strip_prefix(['.', ')'])
}

fn question_word(line: &str) -> Option<&str> {
    let split = line
        .char_indices()
        .nth(QUESTION_WORD.chars().count())
        .map_or(line.len(), |(idx, _)| idx);
    let (word, rest) = line.split_at(split);
    if word.to_lowercase() != QUESTION_WORD {
        return None;
    }

    let rest = digits(rest.trim_start())?;
    Some(rest.strip_prefix(':').unwrap_or(rest))
}

fn labelled(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    let rest = if first.is_ascii_digit() {
        digits(line)?
    } else if first.is_alphabetic() {
        chars.as_str()
    } else {
        return None;
    };

    rest.trim_start().strip_prefix(['.', ')'])
}

fn dashed(line: &str) -> Option<&str> {
    line.strip_prefix('-')
}

/// Strip the question numbering from a prompt line.
pub fn clean_prompt(line: &str) -> &str {
    apply_first(line.trim(), PROMPT_RULES)
}

/// Strip one enumeration marker from an option line.
pub fn clean_option(line: &str) -> &str {
    apply_first(line.trim(), ENUMERATION_RULES)
}

/// Test a raw option line for a correctness marker, then strip the marker
/// and one enumeration marker. Returns `(is_correct, text)`.
pub fn split_marked_option(line: &str) -> (bool, &str) {
    let line = line.trim();
    match line.strip_prefix(CORRECT_MARKERS) {
        Some(rest) => (true, clean_option(rest)),
        None => (false, clean_option(line)),
    }
}

use super::markers::clean_option;

/// Turn a pasted list into one question's options: one option per
/// non-empty line, enumeration stripped. Correctness markers are not
/// recognized here.
pub fn paste_options(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| clean_option(line).to_string())
        .collect()
}

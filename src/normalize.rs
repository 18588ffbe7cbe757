use regex::Regex;
use std::sync::OnceLock;

// Punctuation that never participates in answer comparison.
fn punctuation() -> &'static Regex {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION.get_or_init(|| Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").unwrap())
}

fn whitespace_runs() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Canonical form used for every answer comparison: punctuation stripped,
/// trimmed, whitespace runs collapsed to a single space, lowercased.
pub fn normalize(input: &str) -> String {
    let stripped = punctuation().replace_all(input, "");
    whitespace_runs()
        .replace_all(stripped.trim(), " ")
        .to_lowercase()
}

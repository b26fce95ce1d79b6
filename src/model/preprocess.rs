use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$(),\n"%^*?\\:;~`0-9]"#).unwrap());

static BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\[\]]").unwrap());

/// Normalizes raw input before classification: punctuation, digits and
/// brackets become spaces and the result is lowercased.
pub fn preprocess(text: &str) -> String {
    let text = PUNCTUATION.replace_all(text, " ");
    let text = BRACKETS.replace_all(&text, " ");
    text.to_lowercase()
}

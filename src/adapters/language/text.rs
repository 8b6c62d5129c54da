//! Text normalization shared by the language adapters.

/// Replaces every ASCII punctuation character with a space.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect()
}

/// Lowercase tokens of `text` with punctuation removed.
pub fn tokens(text: &str) -> Vec<String> {
    strip_punctuation(text)
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

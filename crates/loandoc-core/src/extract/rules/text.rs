//! Text normalization for located values.

use super::patterns::WHITESPACE_RUN;

/// Separator characters left dangling around a value.
const STRAY_PUNCTUATION: &[char] = &[':', '：', ';', '|', ','];

/// Clean a raw value: collapse whitespace runs to one space, trim, and
/// strip stray separators from both ends.
pub fn clean_text(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw, " ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || STRAY_PUNCTUATION.contains(&c))
        .to_string()
}

//! Common regex patterns for loan-document extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Template for a labeled value: label, optional (full-width) colon, then
/// the rest of the line. Leading whitespace may span a line break, so a
/// label alone on its line takes the next line as its value.
pub const LABEL_VALUE_TEMPLATE: &str = r"\s*[:：]?\s*(.+?)(?:\n|$)";

lazy_static! {
    // First run of digits and separators inside a located value
    pub static ref NUMBER_RUN: Regex = Regex::new(r"[0-9.,]+").unwrap();

    // Whitespace runs (including non-breaking and zero-width variants)
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"[\s\u{00a0}\u{200b}]+").unwrap();
}

/// Build the case-insensitive pattern for one label.
pub fn label_pattern(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}{}", regex::escape(label), LABEL_VALUE_TEMPLATE))
}

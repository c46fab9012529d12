//! Rule-based building blocks for loan-document field extraction.

pub mod locator;
pub mod numbers;
pub mod patterns;
pub mod text;

pub use locator::{locate, locate_number, KeywordLocator};
pub use numbers::{format_vnd, parse_number};
pub use text::clean_text;

/// A label hit in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMatch<T> {
    /// Extracted value.
    pub value: T,
    /// The keyword that matched.
    pub label: String,
    /// Byte span of the whole match in the source text.
    pub position: (usize, usize),
}

impl<T> LabelMatch<T> {
    pub fn new(value: T, label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value,
            label: label.into(),
            position: (start, end),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LabelMatch<U> {
        LabelMatch {
            value: f(self.value),
            label: self.label,
            position: self.position,
        }
    }
}

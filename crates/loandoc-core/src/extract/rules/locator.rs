//! Keyword locator: finds the value written after a label.

use regex::Regex;
use tracing::{trace, warn};

use super::numbers::parse_number;
use super::patterns::{label_pattern, NUMBER_RUN};
use super::text::clean_text;
use super::LabelMatch;

/// Compiled label patterns for one ordered keyword list.
#[derive(Debug, Clone)]
pub struct KeywordLocator {
    labels: Vec<(String, Regex)>,
    value_pattern: Option<Regex>,
}

impl KeywordLocator {
    /// Compile a locator for `keywords`, tried in the given order.
    pub fn new<I>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let labels = keywords
            .into_iter()
            .map(|k| {
                let k = k.as_ref();
                label_pattern(k).map(|re| (k.to_string(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            labels,
            value_pattern: None,
        })
    }

    /// Narrow located values with `pattern`; its first capture group (or the
    /// whole match if it has none) replaces the value when it matches.
    pub fn with_value_pattern(mut self, pattern: Regex) -> Self {
        self.value_pattern = Some(pattern);
        self
    }

    /// Find the value after the first label that occurs anywhere in `text`.
    ///
    /// Labels are tried in order; for the first one with a match, its first
    /// occurrence wins and later labels are never consulted. The value is
    /// the normalized rest of that line and may be empty.
    pub fn find(&self, text: &str) -> Option<LabelMatch<String>> {
        for (label, re) in &self.labels {
            let Some(caps) = re.captures(text) else {
                continue;
            };
            let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let value = clean_text(value.as_str());
            let value = match &self.value_pattern {
                Some(pattern) => apply_value_pattern(pattern, value),
                None => value,
            };

            trace!(label = %label, value = %value, "label matched");
            return Some(LabelMatch::new(value, label.as_str(), whole.start(), whole.end()));
        }

        None
    }

    /// Located value, or `None` if no label matched.
    pub fn locate(&self, text: &str) -> Option<String> {
        self.find(text).map(|m| m.value)
    }

    /// Number in the located value.
    ///
    /// `None` when no label matched or the value's first run of digits and
    /// separators holds no digit.
    pub fn find_number(&self, text: &str) -> Option<LabelMatch<f64>> {
        let found = self.find(text)?;
        let run = NUMBER_RUN.find(&found.value)?.as_str();
        if !run.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        let number = parse_number(run);
        Some(found.map(|_| number))
    }

    /// Number after the first matching label, `0` when absent.
    pub fn locate_number(&self, text: &str) -> f64 {
        self.find_number(text).map(|m| m.value).unwrap_or(0.0)
    }
}

fn apply_value_pattern(pattern: &Regex, value: String) -> String {
    let narrowed = pattern
        .captures(&value)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str().to_string());

    narrowed.unwrap_or(value)
}

fn compile_lenient(keywords: &[&str]) -> KeywordLocator {
    let labels = keywords
        .iter()
        .filter_map(|k| match label_pattern(k) {
            Ok(re) => Some((k.to_string(), re)),
            Err(e) => {
                warn!(label = %k, error = %e, "skipping label that does not compile");
                None
            }
        })
        .collect();

    KeywordLocator {
        labels,
        value_pattern: None,
    }
}

/// One-shot form of [`KeywordLocator::locate`].
pub fn locate(keywords: &[&str], text: &str, value_pattern: Option<&Regex>) -> Option<String> {
    let mut locator = compile_lenient(keywords);
    locator.value_pattern = value_pattern.cloned();
    locator.locate(text)
}

/// One-shot form of [`KeywordLocator::locate_number`].
pub fn locate_number(keywords: &[&str], text: &str) -> f64 {
    compile_lenient(keywords).locate_number(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_basic() {
        let text = "Họ và tên: Nguyễn Văn A\nCCCD: 001234567890";
        assert_eq!(locate(&["Họ và tên"], text, None), Some("Nguyễn Văn A".to_string()));
        assert_eq!(locate(&["CCCD"], text, None), Some("001234567890".to_string()));
    }

    #[test]
    fn test_locate_not_found() {
        assert_eq!(locate(&["Lãi suất", "LS"], "Họ và tên: B", None), None);
        assert_eq!(locate(&["Lãi suất"], "", None), None);
        assert_eq!(locate(&[], "Lãi suất: 9%", None), None);
    }

    #[test]
    fn test_locate_case_insensitive_and_fullwidth_colon() {
        let text = "MỤC ĐÍCH VAY：Mua nhà ở";
        assert_eq!(locate(&["Mục đích vay"], text, None), Some("Mua nhà ở".to_string()));

        let text = "lãi suất 9,5%/năm";
        assert_eq!(locate(&["Lãi suất"], text, None), Some("9,5%/năm".to_string()));
    }

    #[test]
    fn test_locate_priority_is_by_keyword_not_position() {
        // "Mục đích" appears first in the text, but "Vay để" is tried first.
        let text = "Mục đích: Mua nhà\nVay để: Sửa nhà";
        assert_eq!(locate(&["Vay để", "Mục đích"], text, None), Some("Sửa nhà".to_string()));

        // Fallback label only when the first never matches.
        let text = "Mục đích: Mua nhà";
        assert_eq!(locate(&["Vay để", "Mục đích"], text, None), Some("Mua nhà".to_string()));
    }

    #[test]
    fn test_locate_first_occurrence_wins() {
        let text = "Lãi suất: 9%\nGhi chú\nLãi suất: 11%";
        assert_eq!(locate(&["Lãi suất"], text, None), Some("9%".to_string()));
    }

    #[test]
    fn test_locate_value_on_next_line() {
        let text = "Họ và tên:\nTrần Thị B\nCCCD: 1";
        assert_eq!(locate(&["Họ và tên"], text, None), Some("Trần Thị B".to_string()));
    }

    #[test]
    fn test_locate_escapes_label() {
        let text = "Tỷ lệ (LTV): 65%";
        assert_eq!(locate(&["Tỷ lệ (LTV)"], text, None), Some("65%".to_string()));
    }

    #[test]
    fn test_locate_empty_value_is_still_a_match() {
        let locator = KeywordLocator::new(["Số điện thoại", "Phone"]).unwrap();
        // A blank value under the first label still stops the search.
        let found = locator.find("Phone: 0901\nSố điện thoại: ").unwrap();
        assert_eq!(found.label, "Số điện thoại");
        assert_eq!(found.value, "");

        // Whitespace after a label may run into the next line.
        let found = locator.find("Số điện thoại: \nPhone: 0901").unwrap();
        assert_eq!(found.value, "Phone: 0901");
    }

    #[test]
    fn test_value_pattern() {
        let pattern = Regex::new(r"(\d{12})").unwrap();
        let text = "CCCD: số 001234567890 cấp ngày 01/01/2020";
        assert_eq!(
            locate(&["CCCD"], text, Some(&pattern)),
            Some("001234567890".to_string())
        );

        // No match falls back to the normalized value.
        let text = "CCCD: chưa cung cấp";
        assert_eq!(
            locate(&["CCCD"], text, Some(&pattern)),
            Some("chưa cung cấp".to_string())
        );
    }

    #[test]
    fn test_locate_number() {
        let text = "Tổng nhu cầu vốn: 1.000.000.000 đồng\nLãi suất: 9,5%/năm";
        assert_eq!(locate_number(&["Tổng nhu cầu vốn"], text), 1_000_000_000.0);
        assert_eq!(locate_number(&["Lãi suất"], text), 9.5);
        assert_eq!(locate_number(&["Vốn đối ứng"], text), 0.0);
    }

    #[test]
    fn test_find_number_without_digits() {
        let locator = KeywordLocator::new(["Số tiền vay"]).unwrap();
        assert!(locator.find_number("Số tiền vay: chưa xác định").is_none());
        assert!(locator.find_number("Số tiền vay: ... xem phụ lục 2").is_none());
        assert_eq!(locator.locate_number("Số tiền vay: chưa xác định"), 0.0);
    }

    #[test]
    fn test_find_reports_position() {
        let text = "Ghi chú\nLTV: 60%";
        let locator = KeywordLocator::new(["LTV"]).unwrap();
        let found = locator.find_number(text).unwrap();
        assert_eq!(found.value, 60.0);
        assert_eq!(found.position.0, "Ghi chú\n".len());
    }
}

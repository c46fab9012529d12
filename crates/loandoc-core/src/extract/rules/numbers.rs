//! Number parsing for locale-ambiguous document text.
//!
//! Loan documents mix `1.234.567,89` (Vietnamese) and `1,234,567.89`
//! (English) conventions, often within the same file.

/// Parse a number whose thousands and decimal separators are unknown.
///
/// Anything other than ASCII digits, `.` and `,` is dropped first. When both
/// separators occur, the one appearing last is the decimal point. When only
/// one kind occurs, a final group of exactly three digits marks it as
/// thousands grouping; otherwise its last occurrence is the decimal point.
///
/// A leading group of exactly `0` overrides the three-digit rule, so
/// `0.125` and `0,500` read as fractions (`0.125`, `0.5`) rather than as
/// `125` and `500`; no amount is written with a zero thousands group.
///
/// Input without digits, or a value too large to be finite, yields `0`.
pub fn parse_number(s: &str) -> f64 {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return 0.0;
    }

    // "800.000.000." at the end of a sentence
    let cleaned = cleaned.trim_end_matches(['.', ',']);

    let decimal_pos = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) => Some(c.max(d)),
        (Some(pos), None) | (None, Some(pos)) => {
            let trailing = &cleaned[pos + 1..];
            let leading = cleaned.split(['.', ',']).next().unwrap_or("");
            if trailing.len() == 3 && leading != "0" {
                None
            } else {
                Some(pos)
            }
        }
        (None, None) => None,
    };

    let digits_only = |part: &str| -> String { part.chars().filter(char::is_ascii_digit).collect() };

    let normalized = match decimal_pos {
        Some(pos) => {
            let integer = digits_only(&cleaned[..pos]);
            let fraction = digits_only(&cleaned[pos + 1..]);
            let integer = if integer.is_empty() { "0".to_string() } else { integer };
            if fraction.is_empty() {
                integer
            } else {
                format!("{}.{}", integer, fraction)
            }
        }
        None => digits_only(cleaned),
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Format a number with the given separators, at most two decimals,
/// trailing fractional zeros dropped.
pub fn format_number(value: f64, thousands: char, decimal: char) -> String {
    let s = format!("{:.2}", value.abs());
    let (integer_part, fraction_part) = s.split_once('.').unwrap_or((s.as_str(), ""));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    if value < 0.0 && s.chars().any(|c| c != '0' && c != '.') {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(thousands);
        }
        formatted.push(*c);
    }

    let fraction_part = fraction_part.trim_end_matches('0');
    if !fraction_part.is_empty() {
        formatted.push(decimal);
        formatted.push_str(fraction_part);
    }

    formatted
}

/// Format a number in Vietnamese style (`1.234.567,5`).
pub fn format_vnd(value: f64) -> String {
    format_number(value, '.', ',')
}

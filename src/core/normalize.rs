//! Decimal separator normalization for raw CSV fields.
//!
//! Telemetry subsystems disagree on whether `12,5` or `12.5` is a decimal
//! literal. Fields are rewritten to the dot form only when they are
//! unambiguously a single decimal number; everything else passes through
//! untouched so that timestamps, version strings and free text are never
//! corrupted.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A bare decimal literal: optional minus sign, digits, optionally one
/// `,` or `.` separator followed by more digits. Anchored over the whole
/// trimmed field.
static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+([,.]\d+)?$").unwrap());

/// Decimal separator convention declared by a telemetry source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSep {
    /// Fields already use `.` as the separator.
    #[default]
    Dot,
    /// Fields use `,` and must be rewritten to `.`.
    Comma,
}

/// Rewrite the decimal separator of `raw` to a dot, if and only if the
/// trimmed field is a bare decimal literal.
///
/// Matching fields are returned trimmed; under the comma convention their
/// separator is replaced with a dot. Fields that do not match the literal
/// pattern (alphabetic text, empty fields, multi-separator strings) are
/// returned exactly as received, regardless of convention. A dot-separated
/// literal inside a comma-convention source is accepted as already
/// canonical and left unchanged.
///
/// # Example
///
/// ```
/// use session_pipeline::core::normalize::{normalize_decimal, DecimalSep};
///
/// assert_eq!(normalize_decimal("12,5", DecimalSep::Comma), "12.5");
/// assert_eq!(normalize_decimal("v1.2.3", DecimalSep::Comma), "v1.2.3");
/// ```
pub fn normalize_decimal(raw: &str, sep: DecimalSep) -> Cow<'_, str> {
    let trimmed = raw.trim();
    if !DECIMAL_LITERAL.is_match(trimmed) {
        return Cow::Borrowed(raw);
    }

    if sep == DecimalSep::Comma && trimmed.contains(',') {
        return Cow::Owned(trimmed.replace(',', "."));
    }

    if trimmed.len() == raw.len() {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_decimal_rewritten() {
        assert_eq!(normalize_decimal("12,5", DecimalSep::Comma), "12.5");
        assert_eq!(normalize_decimal("-3,0", DecimalSep::Comma), "-3.0");
        assert_eq!(normalize_decimal("0,0001", DecimalSep::Comma), "0.0001");
    }

    #[test]
    fn test_dot_decimal_already_canonical() {
        // Separator-agnostic match: a dot literal under the comma
        // convention is already canonical and stays unchanged.
        assert_eq!(normalize_decimal("12.5", DecimalSep::Comma), "12.5");
        assert_eq!(normalize_decimal("12.5", DecimalSep::Dot), "12.5");
    }

    #[test]
    fn test_comma_under_dot_convention_kept() {
        assert_eq!(normalize_decimal("12,5", DecimalSep::Dot), "12,5");
    }

    #[test]
    fn test_integer_literal_unchanged() {
        assert_eq!(normalize_decimal("42", DecimalSep::Comma), "42");
        assert_eq!(normalize_decimal("-7", DecimalSep::Dot), "-7");
    }

    #[test]
    fn test_non_numeric_passes_through() {
        let cases = [
            "",
            " ",
            "abc",
            "1,2,3",
            "1.2.3",
            "12,",
            ",5",
            "v1.2",
            "2024-01-02",
            "1e5",
            "+3,2",
            "12 5",
        ];
        for raw in cases {
            assert_eq!(normalize_decimal(raw, DecimalSep::Comma), raw);
            assert_eq!(normalize_decimal(raw, DecimalSep::Dot), raw);
        }
    }

    #[test]
    fn test_matching_fields_are_trimmed() {
        assert_eq!(normalize_decimal(" 12,5 ", DecimalSep::Comma), "12.5");
        assert_eq!(normalize_decimal(" 12.5 ", DecimalSep::Dot), "12.5");
        assert_eq!(normalize_decimal("\t-3\t", DecimalSep::Dot), "-3");
    }
}

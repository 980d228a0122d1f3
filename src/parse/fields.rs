//! Shared field-extraction helpers
//!
//! Free functions used by all page parsers: text cleanup, date
//! normalization, and amount parsing. The portal renders dates as
//! `dd.mm.yyyy` and prices as `1 234 567,89 ₽`.

use crate::parse::ParseError;
use chrono::NaiveDate;

/// Collapses whitespace runs to single spaces, drops control characters,
/// and trims the result
///
/// Listing markup is heavily indented and wraps values across lines.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = true;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else if ch.is_control() {
            // Non-whitespace control characters never belong in a field
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Keeps only ASCII digits
///
/// Registry numbers are rendered with a `№` prefix and occasional spacing.
pub fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parses a `dd.mm.yyyy` date
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let cleaned = clean_text(raw);
    NaiveDate::parse_from_str(&cleaned, "%d.%m.%Y")
        .map_err(|_| ParseError::InvalidDate(cleaned))
}

/// Parses a money amount
///
/// Strips currency symbols and thousands separators (regular and
/// non-breaking spaces) and accepts a comma as the decimal separator.
pub fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    let normalized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.' || *c == '-')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return Err(ParseError::InvalidAmount(clean_text(raw)));
    }

    normalized
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidAmount(clean_text(raw)))
}

//! End-of-life date validation.

use super::types::ReleaseError;
use chrono::{NaiveDate, Utc};

/// Validate a `YYYY-MM-DD` date and normalize it to `YYYY-MM-DDT00:00:00Z`.
///
/// The input must be exactly four, two and two ASCII digits separated by
/// dashes and must denote a real Gregorian date (`2023-02-29` is rejected).
/// The already-normalized form is accepted too, so normalizing is idempotent.
/// Dates in the past are accepted; a warning is logged for them.
pub fn validate_and_format_date(value: &str) -> Result<String, ReleaseError> {
    let bare = strip_midnight_suffix(value);
    if !has_date_shape(bare) {
        return Err(ReleaseError::InvalidDate(value.to_string()));
    }

    let date = NaiveDate::parse_from_str(bare, "%Y-%m-%d")
        .map_err(|_| ReleaseError::InvalidDate(value.to_string()))?;

    if date < Utc::now().date_naive() {
        log::warn!("end-of-life {} is already in the past", date);
    }

    Ok(format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
}

fn strip_midnight_suffix(value: &str) -> &str {
    value.strip_suffix("T00:00:00Z").unwrap_or(value)
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

//! Calendar date parsing at the input boundary.

use chrono::NaiveDate;

use crate::domain::foundation::ValidationError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date supplied by a caller.
///
/// Anything else (including impossible dates such as `2023-02-29`) is a
/// validation error naming `field`.
pub fn parse_calendar_date(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        ValidationError::invalid_format(field, format!("expected YYYY-MM-DD ({})", e))
    })
}

/// Parses an optional date field; `None` stays `None`.
pub fn parse_optional_calendar_date(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, ValidationError> {
    raw.map(|value| parse_calendar_date(field, value)).transpose()
}

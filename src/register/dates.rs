// src/register/dates.rs
use chrono::NaiveDate;

use crate::utils::error::DateError;

/// Formats a date as the register's `pd_date` token, e.g. `05-JAN-24`.
pub fn encode_request_date(date: NaiveDate) -> String {
    date.format("%d-%b-%y").to_string().to_uppercase()
}

/// Re-renders a `DD/MM/YY` token as `MM/DD/YYYY` in the 2000s.
pub fn normalize_display_date(token: &str) -> Result<String, DateError> {
    let parts: Vec<&str> = token.trim().split('/').collect();
    match parts.as_slice() {
        [day, month, year] => Ok(format!("{}/{}/20{}", month, day, year)),
        _ => Err(DateError::MalformedDate(token.to_string())),
    }
}

/// Parses a user-supplied request date.
///
/// Accepted forms, tried in order:
/// - ISO `YYYY-MM-DD`
/// - the request token `DD-MMM-YY` (month name in any case)
/// - the display token `DD/MM/YY`
pub fn parse_request_date(raw: &str) -> Result<NaiveDate, DateError> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d-%b-%y") {
        return Ok(date);
    }
    if raw.contains('/') {
        match normalize_display_date(raw) {
            Ok(us_date) => {
                if let Ok(date) = NaiveDate::parse_from_str(&us_date, "%m/%d/%Y") {
                    return Ok(date);
                }
                tracing::debug!("Display date '{}' normalized to invalid '{}'", raw, us_date);
            }
            Err(e) => tracing::debug!("{}", e),
        }
    }

    Err(DateError::UnrecognizedRequestDate(raw.to_string()))
}

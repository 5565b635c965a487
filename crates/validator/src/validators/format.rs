//! Named string formats: UUID, calendar date, RFC 3339 timestamp and IANA
//! time zone.

use chrono::NaiveDate;

use crate::foundation::ValidationError;

/// Parses `YYYY-MM-DD` or the compact `YYYYMMDD` form.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    // Byte offsets below are only char boundaries for ASCII input.
    if !input.is_ascii() {
        return None;
    }

    let bytes = input.as_bytes();
    let (year, month, day) = match bytes.len() {
        10 if bytes[4] == b'-' && bytes[7] == b'-' => (&input[0..4], &input[5..7], &input[8..10]),
        8 => (&input[0..4], &input[4..6], &input[6..8]),
        _ => return None,
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !(all_digits(year) && all_digits(month) && all_digits(day)) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

crate::validator! {
    /// Validates a UUID in any of the textual forms `uuid` accepts.
    ///
    /// ```
    /// use contour_validator::foundation::Validate;
    /// use contour_validator::validators::uuid;
    ///
    /// assert!(uuid().validate("5f85b586-a08b-4a1f-8086-4e6228a7aa7f").is_ok());
    /// assert!(uuid().validate("5f85b586").is_err());
    /// ```
    pub Uuid for str;
    rule(input) { ::uuid::Uuid::parse_str(input).is_ok() }
    error(input) { ValidationError::invalid_format("uuid") }
    fn uuid();
}

crate::validator! {
    /// Validates a calendar date, `YYYY-MM-DD` or `YYYYMMDD`.
    pub IsoDate for str;
    rule(input) { parse_date(input).is_some() }
    error(input) { ValidationError::invalid_format("date") }
    fn iso_date();
}

crate::validator! {
    /// Validates an RFC 3339 timestamp with an explicit offset.
    pub DateTime for str;
    rule(input) { chrono::DateTime::parse_from_rfc3339(input).is_ok() }
    error(input) { ValidationError::invalid_format("date-time") }
    fn date_time();
}

crate::validator! {
    /// Validates an IANA time zone name such as `America/Los_Angeles`.
    pub TimeZone for str;
    rule(input) { input.parse::<chrono_tz::Tz>().is_ok() }
    error(input) { ValidationError::invalid_format("time zone") }
    fn time_zone();
}

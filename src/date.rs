//! Parsing of user-supplied date strings into UTC timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{DateField, InviteError, InviteResult};

/// Naive datetime layouts, tried in order. A naive value is taken as the
/// intended instant and stored as UTC without conversion.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%SZ",
    "%Y%m%dT%H%M%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Parse a date/time string for the given field.
///
/// Accepts RFC 3339 (offsets are normalized to UTC), iCalendar basic
/// form, common naive layouts, bare dates (midnight), and as a last
/// resort natural language such as "tomorrow 3pm".
pub fn parse_timestamp(field: DateField, input: &str) -> InviteResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(malformed(field, input));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        tracing::trace!(%field, "parsed as RFC 3339");
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            tracing::trace!(%field, format, "parsed as naive datetime");
            return Ok(dt.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            tracing::trace!(%field, format, "parsed as date");
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    match fuzzydate::parse(trimmed) {
        Ok(dt) if has_time_component(trimmed) => {
            tracing::trace!(%field, "parsed as natural language datetime");
            Ok(dt.and_utc())
        }
        Ok(dt) => {
            // "next friday" names a day, not the current wall-clock time on it
            tracing::trace!(%field, "parsed as natural language date");
            Ok(dt.date().and_time(NaiveTime::MIN).and_utc())
        }
        Err(_) => {
            tracing::debug!(%field, input, "unparseable date string");
            Err(malformed(field, input))
        }
    }
}

/// Check if the input contains time-related tokens: am/pm, HH:MM,
/// noon, midnight, or "at" followed by a digit.
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        // "6pm", "6 pm", "11am"
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            let digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let digit_before_space = i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit();
            if digit_before || digit_before_space {
                return true;
            }
        }

        // "9:30"
        if b == b':' {
            let digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let digit_after = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if digit_before && digit_after {
                return true;
            }
        }
    }

    // "at 3", "friday at 15"
    let after_at = lower
        .strip_prefix("at ")
        .or_else(|| lower.find(" at ").map(|pos| &lower[pos + 4..]));
    after_at.is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

fn malformed(field: DateField, input: &str) -> InviteError {
    InviteError::MalformedDate {
        field,
        input: input.to_string(),
    }
}

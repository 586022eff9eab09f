//! Date expression parsing for the temporal rules.
//!
//! Naive dates and times are read as UTC. Relative keywords and bare times
//! are anchored on the supplied reference instant so callers can pin "now"
//! through a [`mockable::Clock`].

use std::fmt::Write as _;

use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parses a date expression relative to `now`.
///
/// Accepts `now`, `today`, `tomorrow`, `yesterday`, RFC 3339 timestamps,
/// common date and date-time layouts, and bare times (today at that time).
#[must_use]
pub fn parse_date_expression(expression: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "now" => return Some(now),
        "today" => return Some(start_of_day(now.date_naive())),
        "tomorrow" => return now.date_naive().checked_add_days(Days::new(1)).map(start_of_day),
        "yesterday" => return now.date_naive().checked_sub_days(Days::new(1)).map(start_of_day),
        _ => {}
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
                .map(|time| now.date_naive().and_time(time))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Interprets an input value as an instant.
///
/// Strings are parsed as date expressions; integral numbers are Unix
/// timestamps in seconds.
#[must_use]
pub fn value_to_datetime(value: &Value, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_date_expression(text, now),
        Value::Number(number) => number
            .as_i64()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
        _ => None,
    }
}

/// Converts a PHP-style date format (`Y-m-d H:i:s`) to a `chrono` strftime
/// format. Unknown letters are kept literally; `\` escapes the next letter.
#[must_use]
pub fn to_strftime(format: &str) -> String {
    let mut converted = String::with_capacity(format.len() * 2);
    let mut characters = format.chars();

    while let Some(character) = characters.next() {
        let directive = match character {
            'd' => "%d",
            'j' => "%-d",
            'm' => "%m",
            'n' => "%-m",
            'Y' => "%Y",
            'y' => "%y",
            'H' => "%H",
            'G' => "%-H",
            'h' => "%I",
            'g' => "%-I",
            'i' => "%M",
            's' => "%S",
            'A' => "%p",
            'a' => "%P",
            'D' => "%a",
            'l' => "%A",
            'M' => "%b",
            'F' => "%B",
            'U' => "%s",
            '%' => "%%",
            '\\' => {
                if let Some(escaped) = characters.next() {
                    converted.push(escaped);
                }
                continue;
            }
            literal => {
                converted.push(literal);
                continue;
            }
        };
        converted.push_str(directive);
    }

    converted
}

/// Returns `true` when `value` matches `format` exactly.
///
/// The value must parse under the converted format and format back to the
/// identical text. Components the format leaves out default to the Unix
/// epoch date or midnight, so partial formats such as `Y H:i` still match.
#[must_use]
pub fn matches_format(value: &str, format: &str) -> bool {
    let strftime = to_strftime(format);

    let instant = NaiveDateTime::parse_from_str(value, &strftime)
        .ok()
        .or_else(|| {
            let mut parsed = Parsed::new();
            chrono::format::parse(&mut parsed, value, StrftimeItems::new(&strftime)).ok()?;
            Some(date_part(&parsed)?.and_time(time_part(&parsed)?))
        });

    instant.is_some_and(|naive| {
        let mut rendered = String::new();
        write!(rendered, "{}", naive.format(&strftime)).is_ok() && rendered == value
    })
}

fn date_part(parsed: &Parsed) -> Option<NaiveDate> {
    parsed.to_naive_date().ok().or_else(|| {
        let mut filled = parsed.clone();
        if parsed.year().is_none() && parsed.year_mod_100().is_none() {
            filled.set_year(1970).ok()?;
        }
        if parsed.ordinal().is_none() {
            if parsed.month().is_none() {
                filled.set_month(1).ok()?;
            }
            if parsed.day().is_none() {
                filled.set_day(1).ok()?;
            }
        }
        filled.to_naive_date().ok()
    })
}

fn time_part(parsed: &Parsed) -> Option<NaiveTime> {
    parsed.to_naive_time().ok().or_else(|| {
        let mut filled = parsed.clone();
        if parsed.hour_mod_12().is_none() {
            filled.set_hour(0).ok()?;
        }
        if parsed.minute().is_none() {
            filled.set_minute(0).ok()?;
        }
        filled.to_naive_time().ok()
    })
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

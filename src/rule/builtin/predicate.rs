//! Parameterless rules backed by a plain value predicate.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, ToSocketAddrs};

use serde_json::Value;
use url::Url;

use crate::rule::domain::{ConfigurationResult, Inputs, Rule, as_number};

/// A parameterless rule whose outcome depends only on the value.
#[derive(Clone, Copy)]
pub struct Predicate {
    name: &'static str,
    check: fn(&Value) -> bool,
}

impl Predicate {
    /// Creates a predicate rule.
    #[must_use]
    pub const fn new(name: &'static str, check: fn(&Value) -> bool) -> Self {
        Self { name, check }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Predicate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Rule for Predicate {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        _parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        Ok((self.check)(value))
    }
}

/// Present and non-blank: not null, not whitespace-only, not an empty
/// collection.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Checkbox-style acceptance: the strings `yes`, `on`, `1` and `true`, the
/// number `1`, or boolean `true`.
#[must_use]
pub fn is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_i64() == Some(1),
        Value::String(text) => matches!(text.as_str(), "yes" | "on" | "1" | "true"),
        _ => false,
    }
}

/// Booleans and their `0`/`1` spellings.
#[must_use]
pub fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(number) => matches!(number.as_i64(), Some(0 | 1)),
        Value::String(text) => matches!(text.as_str(), "0" | "1"),
        _ => false,
    }
}

/// Arrays and objects.
#[must_use]
pub const fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Strings of any content.
#[must_use]
pub const fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Numbers and numeric strings.
#[must_use]
pub fn is_number(value: &Value) -> bool {
    as_number(value).is_some()
}

/// Integral numbers and strings of an optionally signed digit run.
#[must_use]
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.is_i64() || number.is_u64(),
        Value::String(text) => {
            let trimmed = text.trim();
            let digits = trimmed
                .strip_prefix(['+', '-'])
                .unwrap_or(trimmed);
            !digits.is_empty() && digits.chars().all(|character| character.is_ascii_digit())
        }
        _ => false,
    }
}

/// Strings that decode as JSON; numbers and `true` count as JSON scalars.
#[must_use]
pub fn is_json(value: &Value) -> bool {
    match value {
        Value::String(text) => {
            !text.is_empty() && serde_json::from_str::<Value>(text).is_ok()
        }
        Value::Number(_) => true,
        Value::Bool(flag) => *flag,
        _ => false,
    }
}

/// Strings made of ASCII characters only.
#[must_use]
pub fn is_ascii(value: &Value) -> bool {
    value.as_str().is_some_and(str::is_ascii)
}

/// Non-empty strings of letters.
#[must_use]
pub fn is_alpha(value: &Value) -> bool {
    non_empty_str_all(value, char::is_alphabetic)
}

/// Non-empty strings of letters and digits.
#[must_use]
pub fn is_alpha_numeric(value: &Value) -> bool {
    non_empty_str_all(value, char::is_alphanumeric)
}

/// Non-empty strings of letters, digits, dashes and underscores.
#[must_use]
pub fn is_alpha_dash(value: &Value) -> bool {
    non_empty_str_all(value, |character| {
        character.is_alphanumeric() || matches!(character, '-' | '_')
    })
}

fn non_empty_str_all(value: &Value, accept: impl Fn(char) -> bool) -> bool {
    value
        .as_str()
        .is_some_and(|text| !text.is_empty() && text.chars().all(accept))
}

/// IPv4 or IPv6 addresses.
#[must_use]
pub fn is_ip(value: &Value) -> bool {
    value.as_str().is_some_and(|text| text.parse::<IpAddr>().is_ok())
}

/// IPv4 addresses.
#[must_use]
pub fn is_ipv4(value: &Value) -> bool {
    value.as_str().is_some_and(|text| text.parse::<Ipv4Addr>().is_ok())
}

/// IPv6 addresses.
#[must_use]
pub fn is_ipv6(value: &Value) -> bool {
    value.as_str().is_some_and(|text| text.parse::<Ipv6Addr>().is_ok())
}

/// MAC addresses as six hex pairs separated by `:` or `-`, or three hex
/// quads separated by `.`.
#[must_use]
pub fn is_mac(value: &Value) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };

    let hex_groups = |separator: char, count: usize, width: usize| {
        let groups: Vec<_> = text.split(separator).collect();
        groups.len() == count
            && groups.iter().all(|group| {
                group.len() == width && group.chars().all(|character| character.is_ascii_hexdigit())
            })
    };

    hex_groups(':', 6, 2) || hex_groups('-', 6, 2) || hex_groups('.', 3, 4)
}

/// Absolute URLs with a host.
#[must_use]
pub fn is_url(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|text| Url::parse(text).ok())
        .is_some_and(|url| url.has_host())
}

/// URLs whose host resolves to at least one address.
///
/// Performs a blocking DNS lookup.
#[must_use]
pub fn is_active_url(value: &Value) -> bool {
    let Some(url) = value.as_str().and_then(|text| Url::parse(text).ok()) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    let port = url.port_or_known_default().unwrap_or(80);

    (host, port)
        .to_socket_addrs()
        .is_ok_and(|mut addresses| addresses.next().is_some())
}

/// IANA time zone names such as `Europe/Berlin` or `UTC`.
#[must_use]
pub fn is_timezone(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|text| text.parse::<chrono_tz::Tz>().is_ok())
}

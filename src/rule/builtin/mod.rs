//! Built-in rules and the factory table that names them.
//!
//! Rules are registered under underscore keys (`min_string`) and report a
//! dotted display name (`min.string`), which is also their message key.

mod comparison;
mod markers;
mod network;
mod predicate;
mod size;
mod temporal;
mod text;

use std::sync::Arc;

pub use comparison::{Different, Same};
pub use markers::Marker;
pub use network::{Email, EmailCheck};
pub use predicate::Predicate;
pub use size::{Bound, Measure, SizeRule};
pub use temporal::{DateComparison, DateFormat, DateTimeRule, SharedClock};
pub use text::{Affix, AffixPosition, Digits, Pattern, compile_delimited};

use crate::rule::domain::Rule;

/// Marker that stops a field's evaluation after its first failure.
pub const BAIL: &str = "bail";

/// Marker that skips a field entirely when its value is null.
pub const NULLABLE: &str = "nullable";

/// Every registry key served by [`builtin_rule`].
pub const BUILTIN_RULES: [&str; 48] = [
    "bail",
    "nullable",
    "required",
    "checked",
    "bool",
    "array",
    "string",
    "number",
    "integer",
    "digits",
    "json",
    "ascii",
    "alpha_chars",
    "alpha_num",
    "alpha_dash",
    "starts_with",
    "starts_without",
    "ends_with",
    "ends_without",
    "regex",
    "not_regex",
    "same",
    "different",
    "min_string",
    "max_string",
    "size_string",
    "between_string",
    "min_number",
    "max_number",
    "size_number",
    "between_number",
    "min_array",
    "max_array",
    "size_array",
    "between_array",
    "date_time",
    "date_format",
    "date_before",
    "date_after",
    "date_equals",
    "timezone",
    "ip",
    "ipv4",
    "ipv6",
    "mac",
    "email",
    "url",
    "active_url",
];

/// Returns `true` when `name` is a built-in registry key.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_RULES.contains(&name)
}

/// Builds the built-in rule registered under `name`.
///
/// Returns `None` for names without a built-in implementation.
#[must_use]
pub fn builtin_rule(name: &str, clock: &SharedClock) -> Option<Arc<dyn Rule>> {
    let rule: Arc<dyn Rule> = match name {
        BAIL => Arc::new(Marker::new(BAIL)),
        NULLABLE => Arc::new(Marker::new(NULLABLE)),
        "required" => Arc::new(Predicate::new("required", predicate::is_present)),
        "checked" => Arc::new(Predicate::new("checked", predicate::is_checked)),
        "bool" => Arc::new(Predicate::new("bool", predicate::is_boolean)),
        "array" => Arc::new(Predicate::new("array", predicate::is_array)),
        "string" => Arc::new(Predicate::new("string", predicate::is_string)),
        "number" => Arc::new(Predicate::new("number", predicate::is_number)),
        "integer" => Arc::new(Predicate::new("integer", predicate::is_integer)),
        "json" => Arc::new(Predicate::new("json", predicate::is_json)),
        "ascii" => Arc::new(Predicate::new("ascii", predicate::is_ascii)),
        "alpha_chars" => Arc::new(Predicate::new("alpha.chars", predicate::is_alpha)),
        "alpha_num" => Arc::new(Predicate::new("alpha.num", predicate::is_alpha_numeric)),
        "alpha_dash" => Arc::new(Predicate::new("alpha.dash", predicate::is_alpha_dash)),
        "timezone" => Arc::new(Predicate::new("timezone", predicate::is_timezone)),
        "ip" => Arc::new(Predicate::new("ip", predicate::is_ip)),
        "ipv4" => Arc::new(Predicate::new("ipv4", predicate::is_ipv4)),
        "ipv6" => Arc::new(Predicate::new("ipv6", predicate::is_ipv6)),
        "mac" => Arc::new(Predicate::new("mac", predicate::is_mac)),
        "url" => Arc::new(Predicate::new("url", predicate::is_url)),
        "active_url" => Arc::new(Predicate::new("active.url", predicate::is_active_url)),
        "digits" => Arc::new(Digits),
        "starts_with" => Arc::new(Affix::new("starts.with", AffixPosition::Start, false)),
        "starts_without" => Arc::new(Affix::new("starts.without", AffixPosition::Start, true)),
        "ends_with" => Arc::new(Affix::new("ends.with", AffixPosition::End, false)),
        "ends_without" => Arc::new(Affix::new("ends.without", AffixPosition::End, true)),
        "regex" => Arc::new(Pattern::new("regex", false)),
        "not_regex" => Arc::new(Pattern::new("not.regex", true)),
        "same" => Arc::new(Same),
        "different" => Arc::new(Different),
        "email" => Arc::new(Email),
        "date_time" => Arc::new(DateTimeRule::new(Arc::clone(clock))),
        "date_format" => Arc::new(DateFormat),
        "date_before" => Arc::new(DateComparison::new("date.before", "<", Arc::clone(clock))),
        "date_after" => Arc::new(DateComparison::new("date.after", ">", Arc::clone(clock))),
        "date_equals" => Arc::new(DateComparison::new("date.equals", "=", Arc::clone(clock))),
        other => size_rule(other)?,
    };
    Some(rule)
}

fn size_rule(name: &str) -> Option<Arc<dyn Rule>> {
    let (display, measure, bound) = match name {
        "min_string" => ("min.string", Measure::Characters, Bound::Min),
        "max_string" => ("max.string", Measure::Characters, Bound::Max),
        "size_string" => ("size.string", Measure::Characters, Bound::Exact),
        "between_string" => ("between.string", Measure::Characters, Bound::Between),
        "min_number" => ("min.number", Measure::Number, Bound::Min),
        "max_number" => ("max.number", Measure::Number, Bound::Max),
        "size_number" => ("size.number", Measure::Number, Bound::Exact),
        "between_number" => ("between.number", Measure::Number, Bound::Between),
        "min_array" => ("min.array", Measure::Items, Bound::Min),
        "max_array" => ("max.array", Measure::Items, Bound::Max),
        "size_array" => ("size.array", Measure::Items, Bound::Exact),
        "between_array" => ("between.array", Measure::Items, Bound::Between),
        _ => return None,
    };
    Some(Arc::new(SizeRule::new(display, measure, bound)))
}

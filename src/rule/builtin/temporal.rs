//! Date and time rules.
//!
//! Relative expressions are anchored on the validator's clock.

use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use serde_json::Value;

use crate::rule::domain::temporal::{matches_format, parse_date_expression, value_to_datetime};
use crate::rule::domain::{
    ConfigurationResult, Inputs, Rule, compare, parameter, replace_tokens,
};

/// Clock shared by the validator and the rules that read "now".
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// `date_before`, `date_after` and `date_equals`.
///
/// The parameter names another input when such an input exists; otherwise
/// it is parsed as a date expression (`tomorrow`, `2023-01-31`, `15:00`).
#[derive(Clone)]
pub struct DateComparison {
    name: &'static str,
    operator: &'static str,
    clock: SharedClock,
}

impl DateComparison {
    /// Creates a date comparison using `operator` (`<`, `>` or `=`).
    #[must_use]
    pub const fn new(name: &'static str, operator: &'static str, clock: SharedClock) -> Self {
        Self {
            name,
            operator,
            clock,
        }
    }
}

impl fmt::Debug for DateComparison {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DateComparison")
            .field("name", &self.name)
            .field("operator", &self.operator)
            .finish_non_exhaustive()
    }
}

impl Rule for DateComparison {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        parameters: &[String],
        inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        let reference = parameter(self.name, parameters, 0)?;
        let now = self.clock.utc();

        let other = inputs.get(reference).map_or_else(
            || parse_date_expression(reference, now),
            |sibling| value_to_datetime(sibling, now),
        );

        match (value_to_datetime(value, now), other) {
            (Some(mine), Some(theirs)) => {
                compare(&mine.timestamp(), &theirs.timestamp(), self.operator)
            }
            _ => Ok(false),
        }
    }

    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        let date = parameters.first()?;
        Some(replace_tokens(message, &[("%date%", date)]))
    }
}

/// `date_time`: any value that reads as a calendar date or instant.
#[derive(Clone)]
pub struct DateTimeRule {
    clock: SharedClock,
}

impl DateTimeRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new(clock: SharedClock) -> Self {
        Self { clock }
    }
}

impl fmt::Debug for DateTimeRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("DateTimeRule").finish_non_exhaustive()
    }
}

impl Rule for DateTimeRule {
    fn name(&self) -> &str {
        "date.time"
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        _parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        Ok(value_to_datetime(value, self.clock.utc()).is_some())
    }
}

/// `date_format:Y-m-d`: the value renders identically under the format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormat;

impl Rule for DateFormat {
    fn name(&self) -> &str {
        "date.format"
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        let format = parameter(self.name(), parameters, 0)?;

        Ok(value
            .as_str()
            .is_some_and(|text| matches_format(text, format)))
    }

    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        let format = parameters.first()?;
        Some(replace_tokens(message, &[("%format%", format)]))
    }
}

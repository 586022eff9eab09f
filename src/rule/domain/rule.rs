//! The rule contract and the helpers shared by rule implementations.

use std::fmt;

use serde_json::Value;

use super::{ConfigurationError, ConfigurationResult};
use crate::rule::domain::Inputs;

/// A named, stateless predicate evaluated against one field's value.
///
/// Implementations must not keep state between calls; a single instance is
/// cached and shared by every field and every validation run.
///
/// # Examples
///
/// ```
/// use fieldcheck::rule::domain::{ConfigurationResult, Inputs, Rule};
/// use serde_json::Value;
///
/// struct Banana;
///
/// impl Rule for Banana {
///     fn name(&self) -> &str {
///         "banana"
///     }
///
///     fn evaluate(
///         &self,
///         _field: &str,
///         value: &Value,
///         _parameters: &[String],
///         _inputs: &Inputs,
///     ) -> ConfigurationResult<bool> {
///         Ok(value.as_str() == Some("banana"))
///     }
/// }
///
/// let inputs = Inputs::new();
/// assert_eq!(Banana.evaluate("fruit", &Value::from("banana"), &[], &inputs), Ok(true));
/// ```
pub trait Rule: Send + Sync {
    /// Stable identifier used for message lookup and custom-message keys.
    fn name(&self) -> &str;

    /// Evaluates the rule.
    ///
    /// Returns `Ok(false)` when the value fails the rule, including values
    /// the rule cannot interpret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the rule itself is misused, for
    /// example when required parameters are missing.
    fn evaluate(
        &self,
        field: &str,
        value: &Value,
        parameters: &[String],
        inputs: &Inputs,
    ) -> ConfigurationResult<bool>;

    /// Substitutes rule-specific tokens into an already field-substituted
    /// message. `None` leaves the message unchanged.
    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        let _ = (message, parameters);
        None
    }
}

impl fmt::Debug for dyn Rule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Rule")
            .field("name", &self.name())
            .finish()
    }
}

/// Fails with [`ConfigurationError::MissingParameters`] unless at least
/// `required` parameters were supplied.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingParameters`] when too few parameters
/// are present.
pub fn require_parameters(
    rule: &str,
    required: usize,
    parameters: &[String],
) -> ConfigurationResult<()> {
    if parameters.len() < required {
        return Err(ConfigurationError::MissingParameters {
            rule: rule.to_owned(),
            required,
            actual: parameters.len(),
        });
    }
    Ok(())
}

/// Returns the parameter at `index`, failing like [`require_parameters`].
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingParameters`] when the parameter list
/// is shorter than `index + 1`.
pub fn parameter<'a>(
    rule: &str,
    parameters: &'a [String],
    index: usize,
) -> ConfigurationResult<&'a str> {
    parameters
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| ConfigurationError::MissingParameters {
            rule: rule.to_owned(),
            required: index + 1,
            actual: parameters.len(),
        })
}

/// Parses the parameter at `index` as a number.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingParameters`] when absent and
/// [`ConfigurationError::InvalidParameter`] when it is not numeric.
pub fn numeric_parameter(
    rule: &str,
    parameters: &[String],
    index: usize,
) -> ConfigurationResult<f64> {
    let raw = parameter(rule, parameters, index)?;
    parse_number(raw)
        .ok_or_else(|| ConfigurationError::invalid_parameter(rule, raw, "expected a number"))
}

/// Parses the parameter at `index` as a non-negative count.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingParameters`] when absent and
/// [`ConfigurationError::InvalidParameter`] when it is not an unsigned
/// integer.
pub fn count_parameter(
    rule: &str,
    parameters: &[String],
    index: usize,
) -> ConfigurationResult<usize> {
    let raw = parameter(rule, parameters, index)?;
    raw.trim().parse().map_err(|_| {
        ConfigurationError::invalid_parameter(rule, raw, "expected a non-negative integer")
    })
}

/// Compares two values with a textual operator (`<`, `>`, `<=`, `>=`, `=`).
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidOperator`] for any other operator.
pub fn compare<T: PartialOrd>(first: &T, second: &T, operator: &str) -> ConfigurationResult<bool> {
    match operator {
        "<" => Ok(first < second),
        ">" => Ok(first > second),
        "<=" => Ok(first <= second),
        ">=" => Ok(first >= second),
        "=" => Ok(first == second),
        other => Err(ConfigurationError::InvalidOperator(other.to_owned())),
    }
}

/// Interprets a value as a number the way form input usually arrives:
/// JSON numbers directly, strings when their trimmed text parses.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Returns the element count of an array or object value.
#[must_use]
pub fn collection_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(entries) => Some(entries.len()),
        _ => None,
    }
}

/// Replaces each `(token, replacement)` pair in `message`.
#[must_use]
pub fn replace_tokens(message: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(message.to_owned(), |rendered, (token, replacement)| {
            rendered.replace(token, replacement)
        })
}

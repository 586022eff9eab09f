//! Size rules: character counts, numeric magnitudes, and item counts,
//! each bounded from below, above, exactly, or on both sides.

use serde_json::Value;

use crate::rule::domain::{
    ConfigurationResult, Inputs, Rule, as_number, collection_len, compare, count_parameter,
    numeric_parameter, parameter, replace_tokens, require_parameters,
};

/// What a size rule measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Unicode scalar count of a string.
    Characters,
    /// Numeric value of a number or numeric string.
    Number,
    /// Element count of an array or object.
    Items,
}

/// How the measured size is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// At least the first parameter.
    Min,
    /// At most the first parameter.
    Max,
    /// Exactly the first parameter.
    Exact,
    /// Between the first and second parameter, inclusive.
    Between,
}

impl Bound {
    const fn required_parameters(self) -> usize {
        match self {
            Self::Between => 2,
            Self::Min | Self::Max | Self::Exact => 1,
        }
    }
}

/// A size rule such as `min_string`, `size_number` or `between_array`.
#[derive(Debug, Clone, Copy)]
pub struct SizeRule {
    name: &'static str,
    measure: Measure,
    bound: Bound,
}

impl SizeRule {
    /// Creates a size rule.
    #[must_use]
    pub const fn new(name: &'static str, measure: Measure, bound: Bound) -> Self {
        Self {
            name,
            measure,
            bound,
        }
    }

    fn measure(&self, value: &Value) -> Option<f64> {
        match self.measure {
            Measure::Characters => value.as_str().map(|text| count_as_f64(text.chars().count())),
            Measure::Number => as_number(value),
            Measure::Items => collection_len(value).map(count_as_f64),
        }
    }

    fn limit(&self, parameters: &[String], index: usize) -> ConfigurationResult<f64> {
        match self.measure {
            Measure::Number => numeric_parameter(self.name, parameters, index),
            Measure::Characters | Measure::Items => {
                count_parameter(self.name, parameters, index).map(count_as_f64)
            }
        }
    }
}

impl Rule for SizeRule {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        require_parameters(self.name, self.bound.required_parameters(), parameters)?;

        let first = self.limit(parameters, 0)?;
        let second = match self.bound {
            Bound::Between => Some(self.limit(parameters, 1)?),
            Bound::Min | Bound::Max | Bound::Exact => None,
        };

        let Some(size) = self.measure(value) else {
            return Ok(false);
        };

        match (self.bound, second) {
            (Bound::Min, _) => compare(&size, &first, ">="),
            (Bound::Max, _) => compare(&size, &first, "<="),
            (Bound::Exact, _) => compare(&size, &first, "="),
            (Bound::Between, Some(upper)) => {
                Ok(compare(&size, &first, ">=")? && compare(&size, &upper, "<=")?)
            }
            (Bound::Between, None) => Ok(false),
        }
    }

    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        let first = parameter(self.name, parameters, 0).ok()?;
        let rendered = match self.bound {
            Bound::Min => replace_tokens(message, &[("%min%", first)]),
            Bound::Max => replace_tokens(message, &[("%max%", first)]),
            Bound::Exact => replace_tokens(message, &[("%size%", first)]),
            Bound::Between => {
                let second = parameter(self.name, parameters, 1).ok()?;
                replace_tokens(message, &[("%min%", first), ("%max%", second)])
            }
        };
        Some(rendered)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "lengths and item counts stay far below 2^52"
)]
fn count_as_f64(count: usize) -> f64 {
    count as f64
}

//! Rule domain model: the rule contract, rule-string parsing, and the
//! configuration errors raised by misuse of either.

mod error;
mod rule;
mod spec;
pub mod temporal;

pub use error::{ConfigurationError, ConfigurationResult};
pub use rule::{
    Rule, as_number, collection_len, compare, count_parameter, numeric_parameter, parameter,
    replace_tokens, require_parameters,
};
pub use spec::{PARAMETER_SEPARATOR, RULE_SEPARATOR, RuleSpec, rule_name, rule_parameters};

/// Field values keyed by field name, in insertion order.
pub type Inputs = serde_json::Map<String, serde_json::Value>;

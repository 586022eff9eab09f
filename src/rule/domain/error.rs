//! Configuration errors raised by the rule system.
//!
//! These describe programmer mistakes (a malformed rule string, an unknown
//! rule, a clashing registration) and abort the whole validation run. Data
//! that merely fails a rule is never reported through this type.

use thiserror::Error;

/// Errors caused by misuse of the rule system rather than by input data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No built-in or registered rule carries this name.
    #[error("invalid rule name \"{0}\"")]
    InvalidRuleName(String),

    /// A rule was invoked with fewer parameters than it needs.
    #[error(
        "the validation rule \"{rule}\" requires at least {required} parameter{}",
        plural_suffix(*.required)
    )]
    MissingParameters {
        /// Rule name as written in the rule string.
        rule: String,
        /// Minimum parameter count.
        required: usize,
        /// Parameter count actually supplied.
        actual: usize,
    },

    /// A parameter could not be interpreted by the rule.
    #[error("invalid parameter \"{parameter}\" for rule \"{rule}\": {reason}")]
    InvalidParameter {
        /// Rule name.
        rule: String,
        /// The offending parameter text.
        parameter: String,
        /// Why the parameter was rejected.
        reason: String,
    },

    /// A pattern parameter is not a valid delimited regular expression.
    #[error("invalid pattern \"{pattern}\" for rule \"{rule}\": {reason}")]
    InvalidPattern {
        /// Rule name.
        rule: String,
        /// The pattern as written.
        pattern: String,
        /// Compilation failure reason.
        reason: String,
    },

    /// A comparison was requested with an unsupported operator.
    #[error("\"{0}\" is not a valid comparison operator")]
    InvalidOperator(String),

    /// A rule with this name is already known to the registry.
    #[error("a rule with the name \"{0}\" is already in use")]
    DuplicateRule(String),
}

const fn plural_suffix(count: usize) -> &'static str {
    if count > 1 { "s" } else { "" }
}

impl ConfigurationError {
    /// Creates an [`ConfigurationError::InvalidParameter`] error.
    #[must_use]
    pub fn invalid_parameter(
        rule: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            rule: rule.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for operations that can hit a configuration error.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

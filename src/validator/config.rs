//! Validator configuration.

use serde::{Deserialize, Serialize};

use crate::message::services::composer::INTERNAL_NAMESPACE;

/// Configuration shared by every run of a [`super::Validator`].
///
/// # Examples
///
/// ```
/// use fieldcheck::validator::ValidatorConfig;
///
/// let config = ValidatorConfig::default();
/// assert_eq!(config.namespace, "validation");
/// assert!(config.allow_extra_inputs);
///
/// let strict = ValidatorConfig::strict();
/// assert!(!strict.allow_extra_inputs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Translation namespace searched before the built-in `validation`
    /// namespace.
    pub namespace: String,
    /// Whether inputs without a rule entry are accepted when a request does
    /// not say otherwise.
    pub allow_extra_inputs: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            namespace: INTERNAL_NAMESPACE.to_owned(),
            allow_extra_inputs: true,
        }
    }
}

impl ValidatorConfig {
    /// Creates a configuration that reports every undeclared input.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            allow_extra_inputs: false,
            ..Self::default()
        }
    }

    /// Sets the translation namespace for application templates.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

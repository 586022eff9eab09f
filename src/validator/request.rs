//! Per-call validation input.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rule::domain::Inputs;

/// Inputs, rule strings and message overrides for one validation run.
///
/// # Examples
///
/// ```
/// use fieldcheck::validator::ValidationRequest;
/// use serde_json::json;
///
/// let request = ValidationRequest::from_value(json!({"name": "", "age": 17}))
///     .with_rules("name", "required|min_string:2")
///     .with_rules("age", "nullable|min_number:18")
///     .with_custom_message("age.min.number", "Adults only")
///     .with_field_name("name", "full name");
///
/// assert_eq!(request.rules().len(), 2);
/// assert_eq!(request.allows_extra_inputs(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRequest {
    inputs: Inputs,
    rules: IndexMap<String, String>,
    custom_messages: BTreeMap<String, String>,
    field_names: BTreeMap<String, String>,
    allow_extra_inputs: Option<bool>,
}

impl ValidationRequest {
    /// Creates a request for `inputs` with no rules.
    #[must_use]
    pub fn new(inputs: Inputs) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    /// Creates a request from a JSON value; anything but an object yields
    /// empty inputs.
    #[must_use]
    pub fn from_value(inputs: Value) -> Self {
        match inputs {
            Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    /// Declares the `|`-separated rule string for `field`, replacing any
    /// earlier declaration.
    #[must_use]
    pub fn with_rules(mut self, field: impl Into<String>, rules: impl Into<String>) -> Self {
        self.rules.insert(field.into(), rules.into());
        self
    }

    /// Overrides the message for a rule (`min.string`) or for a rule on one
    /// field (`name.min.string`).
    #[must_use]
    pub fn with_custom_message(
        mut self,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.custom_messages.insert(key.into(), message.into());
        self
    }

    /// Overrides the display name substituted for `field`.
    #[must_use]
    pub fn with_field_name(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.field_names.insert(field.into(), name.into());
        self
    }

    /// Sets whether inputs without a rule entry are accepted, overriding the
    /// validator's configured default.
    #[must_use]
    pub const fn allow_extra_inputs(mut self, allow: bool) -> Self {
        self.allow_extra_inputs = Some(allow);
        self
    }

    /// Returns the inputs under validation.
    #[must_use]
    pub const fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Returns the declared rule strings in declaration order.
    #[must_use]
    pub const fn rules(&self) -> &IndexMap<String, String> {
        &self.rules
    }

    /// Returns the per-call message overrides.
    #[must_use]
    pub const fn custom_messages(&self) -> &BTreeMap<String, String> {
        &self.custom_messages
    }

    /// Returns the per-call display names.
    #[must_use]
    pub const fn field_names(&self) -> &BTreeMap<String, String> {
        &self.field_names
    }

    /// Returns the explicit extra-input setting, if any.
    #[must_use]
    pub const fn allows_extra_inputs(&self) -> Option<bool> {
        self.allow_extra_inputs
    }
}

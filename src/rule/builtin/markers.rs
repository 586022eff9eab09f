//! The `bail` and `nullable` control markers.

use serde_json::Value;

use crate::rule::domain::{ConfigurationResult, Inputs, Rule};

/// A rule that always passes; the validator reads its presence in a field's
/// rule list as a control modifier.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    name: &'static str,
}

impl Marker {
    /// Creates a marker rule with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Rule for Marker {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(
        &self,
        _field: &str,
        _value: &Value,
        _parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        Ok(true)
    }
}

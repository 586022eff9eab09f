//! Rules comparing a field against sibling inputs.

use serde_json::Value;

use crate::rule::domain::{
    ConfigurationResult, Inputs, Rule, parameter, replace_tokens, require_parameters,
};

/// `same:other`: both values are strings and identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct Same;

impl Rule for Same {
    fn name(&self) -> &str {
        "same"
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        parameters: &[String],
        inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        let other = parameter(self.name(), parameters, 0)?;

        Ok(match (value, inputs.get(other)) {
            (Value::String(mine), Some(Value::String(theirs))) => mine == theirs,
            _ => false,
        })
    }

    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        let other = parameters.first()?;
        Some(replace_tokens(message, &[("%other%", other)]))
    }
}

/// `different:a,b,...`: every named input exists and differs from the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Different;

impl Rule for Different {
    fn name(&self) -> &str {
        "different"
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        parameters: &[String],
        inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        require_parameters(self.name(), 1, parameters)?;

        Ok(parameters
            .iter()
            .all(|other| inputs.get(other).is_some_and(|theirs| theirs != value)))
    }

    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        let other = parameters.first()?;
        Some(replace_tokens(message, &[("%other%", other)]))
    }
}

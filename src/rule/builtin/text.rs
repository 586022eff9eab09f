//! String-shape rules: digit runs, prefixes and suffixes, patterns.

use regex::Regex;
use serde_json::Value;

use crate::rule::domain::{
    ConfigurationError, ConfigurationResult, Inputs, Rule, count_parameter, parameter,
    replace_tokens, require_parameters,
};

/// `digits:n`: a string of exactly `n` ASCII digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Digits;

impl Rule for Digits {
    fn name(&self) -> &str {
        "digits"
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        let length = count_parameter(self.name(), parameters, 0)?;

        Ok(value.as_str().is_some_and(|text| {
            text.len() == length && text.chars().all(|character| character.is_ascii_digit())
        }))
    }

    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        let digits = parameters.first()?;
        Some(replace_tokens(message, &[("%digits%", digits)]))
    }
}

/// Which end of the string an [`Affix`] rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixPosition {
    /// The string start.
    Start,
    /// The string end.
    End,
}

/// `starts_with`, `starts_without`, `ends_with` and `ends_without`.
#[derive(Debug, Clone, Copy)]
pub struct Affix {
    name: &'static str,
    position: AffixPosition,
    negated: bool,
}

impl Affix {
    /// Creates an affix rule; a negated rule passes when no affix matches.
    #[must_use]
    pub const fn new(name: &'static str, position: AffixPosition, negated: bool) -> Self {
        Self {
            name,
            position,
            negated,
        }
    }
}

impl Rule for Affix {
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
        require_parameters(self.name, 1, parameters)?;

        let Some(text) = value.as_str() else {
            return Ok(false);
        };

        let matched = parameters
            .iter()
            .filter(|affix| !affix.is_empty())
            .any(|affix| match self.position {
                AffixPosition::Start => text.starts_with(affix.as_str()),
                AffixPosition::End => text.ends_with(affix.as_str()),
            });

        Ok(matched != self.negated)
    }

    fn render_placeholder(&self, message: &str, parameters: &[String]) -> Option<String> {
        Some(replace_tokens(message, &[("%values%", &parameters.join(", "))]))
    }
}

/// `regex` and `not_regex` with delimited patterns such as `/^[a-z]+$/i`.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    name: &'static str,
    negated: bool,
}

impl Pattern {
    /// Creates a pattern rule; a negated rule passes when nothing matches.
    #[must_use]
    pub const fn new(name: &'static str, negated: bool) -> Self {
        Self { name, negated }
    }
}

impl Rule for Pattern {
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
        let raw = parameter(self.name, parameters, 0)?;
        let regex = compile_delimited(self.name, raw)?;

        Ok(value
            .as_str()
            .is_some_and(|text| regex.is_match(text) != self.negated))
    }
}

/// Compiles a delimited pattern: `<delimiter>body<delimiter>flags`.
///
/// Bracket delimiters close with their counterpart (`{body}i`). Supported
/// flags are `i`, `m`, `s`, `x`, `U` and `u`; `u` is implied.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidPattern`] for a missing delimiter,
/// unknown flag, or a body the regex engine rejects.
pub fn compile_delimited(rule: &str, raw: &str) -> ConfigurationResult<Regex> {
    let invalid = |reason: String| ConfigurationError::InvalidPattern {
        rule: rule.to_owned(),
        pattern: raw.to_owned(),
        reason,
    };

    let trimmed = raw.trim();
    let mut characters = trimmed.chars();
    let opening = characters
        .next()
        .filter(|delimiter| !delimiter.is_alphanumeric() && !matches!(delimiter, '\\' | ' '))
        .ok_or_else(|| invalid("pattern must start with a delimiter".to_owned()))?;
    let closing = match opening {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        '<' => '>',
        other => other,
    };

    let rest = characters.as_str();
    let end = rest
        .rfind(closing)
        .ok_or_else(|| invalid(format!("missing closing delimiter '{closing}'")))?;
    let (body, tail) = rest.split_at(end);
    let modifiers = tail.get(closing.len_utf8()..).unwrap_or_default();

    let mut flags = String::new();
    for modifier in modifiers.chars() {
        match modifier {
            'i' | 'm' | 's' | 'x' | 'U' => flags.push(modifier),
            'u' => {}
            other => return Err(invalid(format!("unsupported modifier '{other}'"))),
        }
    }

    let source = if flags.is_empty() {
        body.to_owned()
    } else {
        format!("(?{flags}){body}")
    };

    Regex::new(&source).map_err(|error| invalid(error.to_string()))
}

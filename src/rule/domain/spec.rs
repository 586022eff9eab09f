//! Rule-string parser.
//!
//! A field's rules are written as `name[:p1,p2,...]` tokens joined by `|`,
//! e.g. `required|between_string:2,32`. Parameters are comma-separated values
//! with optional double quotes; the pattern rules keep their parameter text
//! whole so commas inside a regular expression survive.

use serde::{Deserialize, Serialize};

/// Separator between rule tokens in a field's rule string.
pub const RULE_SEPARATOR: char = '|';

/// Separator between a rule name and its parameter list.
pub const PARAMETER_SEPARATOR: char = ':';

/// Rules whose parameter text is a single, unsplit pattern.
const PATTERN_RULES: [&str; 2] = ["regex", "not_regex"];

/// A parsed rule token: the rule name and its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    name: String,
    parameters: Vec<String>,
}

impl RuleSpec {
    /// Parses a single `name[:parameters]` token.
    ///
    /// Parsing never fails; a malformed token produces an empty or unknown
    /// name that rule resolution reports later.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldcheck::rule::domain::RuleSpec;
    ///
    /// let spec = RuleSpec::parse("between_number:1,10");
    /// assert_eq!(spec.name(), "between_number");
    /// assert_eq!(spec.parameters(), ["1", "10"]);
    ///
    /// let pattern = RuleSpec::parse("regex:/^a{1,3}$/i");
    /// assert_eq!(pattern.parameters(), ["/^a{1,3}$/i"]);
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Self {
        Self {
            name: rule_name(token).to_owned(),
            parameters: rule_parameters(token),
        }
    }

    /// Parses a full `|`-separated rule string, skipping empty tokens.
    #[must_use]
    pub fn parse_list(rules: &str) -> Vec<Self> {
        rules
            .split(RULE_SEPARATOR)
            .filter(|token| !token.trim().is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parsed parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns `true` when this token names the given rule.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Returns the rule name of a token: the text before the first `:`.
#[must_use]
pub fn rule_name(token: &str) -> &str {
    token
        .split_once(PARAMETER_SEPARATOR)
        .map_or(token, |(name, _)| name)
        .trim()
}

/// Returns the ordered parameters of a token.
///
/// Only the first `:` separates the name, so parameters may contain colons
/// (`date_after:15:00`).
#[must_use]
pub fn rule_parameters(token: &str) -> Vec<String> {
    let Some((name, raw)) = token.split_once(PARAMETER_SEPARATOR) else {
        return Vec::new();
    };

    if PATTERN_RULES.contains(&name.trim()) {
        return vec![raw.to_owned()];
    }

    split_csv(raw)
}

fn split_csv(raw: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut characters = raw.chars().peekable();

    while let Some(character) = characters.next() {
        match character {
            '"' if in_quotes && characters.peek() == Some(&'"') => {
                current.push('"');
                characters.next();
            }
            '"' if in_quotes => in_quotes = false,
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(character),
        }
    }
    values.push(current);

    values
}

//! In-memory translator adapter with built-in English templates.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::message::ports::translator::Translator;

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Errors raised while loading translations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslatorError {
    /// The document is not valid JSON.
    #[error("invalid translation JSON for locale '{locale}': {reason}")]
    InvalidJson {
        /// Locale being loaded.
        locale: String,
        /// Parser failure.
        reason: String,
    },

    /// The document root is not an object.
    #[error("translations for locale '{0}' must be a JSON object")]
    NotAnObject(String),

    /// A leaf value is not a string.
    #[error("translation '{key}' for locale '{locale}' must be a string")]
    NonStringMessage {
        /// Locale being loaded.
        locale: String,
        /// Dotted key of the offending value.
        key: String,
    },
}

/// Translator backed by per-locale maps of dotted keys.
///
/// Lookups try the active locale, then the fallback locale. The English
/// templates for every built-in rule are preloaded under `validation.*`.
///
/// # Examples
///
/// ```
/// use fieldcheck::message::adapters::memory::InMemoryTranslator;
/// use fieldcheck::message::ports::translator::Translator;
///
/// let translator = InMemoryTranslator::new()
///     .with_message("de", "validation.required", "%Field% ist erforderlich")
///     .with_locale("de");
///
/// assert_eq!(
///     translator.get("validation.required").as_deref(),
///     Some("%Field% ist erforderlich")
/// );
/// assert_eq!(
///     translator.get("validation.string").as_deref(),
///     Some("The %field% must be a string")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryTranslator {
    locales: HashMap<String, HashMap<String, String>>,
    locale: String,
    fallback_locale: String,
}

impl InMemoryTranslator {
    /// Creates a translator with the English defaults and `en` active.
    #[must_use]
    pub fn new() -> Self {
        let defaults = default_messages()
            .iter()
            .map(|(key, message)| (format!("validation.{key}"), (*message).to_owned()))
            .collect();

        Self {
            locales: HashMap::from([(DEFAULT_LOCALE.to_owned(), defaults)]),
            locale: DEFAULT_LOCALE.to_owned(),
            fallback_locale: DEFAULT_LOCALE.to_owned(),
        }
    }

    /// Creates a translator without any messages.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            locales: HashMap::new(),
            locale: DEFAULT_LOCALE.to_owned(),
            fallback_locale: DEFAULT_LOCALE.to_owned(),
        }
    }

    /// Sets the active locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Sets the locale consulted when the active one lacks a key.
    #[must_use]
    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    /// Adds or replaces one message.
    #[must_use]
    pub fn with_message(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(key.into(), message.into());
        self
    }

    /// Merges a JSON document into `locale`, flattening nested objects into
    /// dotted keys (`{"validation": {"required": "..."}}` becomes
    /// `validation.required`).
    ///
    /// # Errors
    ///
    /// Returns [`TranslatorError`] when the text is not JSON, the root is not
    /// an object, or a leaf is not a string.
    pub fn with_json_messages(
        mut self,
        locale: impl Into<String>,
        json: &str,
    ) -> Result<Self, TranslatorError> {
        let target = locale.into();
        let document: Value =
            serde_json::from_str(json).map_err(|error| TranslatorError::InvalidJson {
                locale: target.clone(),
                reason: error.to_string(),
            })?;
        let Value::Object(root) = document else {
            return Err(TranslatorError::NotAnObject(target));
        };

        let mut flattened = Vec::new();
        flatten(&target, "", &root, &mut flattened)?;
        self.locales.entry(target).or_default().extend(flattened);
        Ok(self)
    }

    /// Returns the active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for InMemoryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for InMemoryTranslator {
    fn get(&self, key: &str) -> Option<String> {
        [&self.locale, &self.fallback_locale]
            .into_iter()
            .find_map(|locale| self.locales.get(locale)?.get(key))
            .cloned()
    }
}

fn flatten(
    locale: &str,
    prefix: &str,
    object: &serde_json::Map<String, Value>,
    into: &mut Vec<(String, String)>,
) -> Result<(), TranslatorError> {
    for (segment, value) in object {
        let key = if prefix.is_empty() {
            segment.clone()
        } else {
            format!("{prefix}.{segment}")
        };
        match value {
            Value::String(message) => into.push((key, message.clone())),
            Value::Object(nested) => flatten(locale, &key, nested, into)?,
            _ => {
                return Err(TranslatorError::NonStringMessage {
                    locale: locale.to_owned(),
                    key,
                });
            }
        }
    }
    Ok(())
}

const fn default_messages() -> &'static [(&'static str, &'static str)] {
    &[
        ("_unexpected", "%Field% was not expected"),
        ("required", "The %field% field is required"),
        ("checked", "The %field% must be accepted"),
        ("bool", "The %field% field must be true or false"),
        ("array", "The %field% must be an array"),
        ("string", "The %field% must be a string"),
        ("number", "The %field% must be a number"),
        ("integer", "The %field% must be an integer"),
        ("digits", "The %field% must be %digits% digits"),
        ("json", "The %field% must be a valid JSON string"),
        ("ascii", "The %field% must only contain ASCII letters"),
        ("alpha.chars", "The %field% must only contain letters"),
        ("alpha.num", "The %field% must only contain letters and numbers"),
        (
            "alpha.dash",
            "The %field% must only contain letters, numbers, dashes and underscores",
        ),
        (
            "starts.with",
            "The %field% must start with one of the following: %values%",
        ),
        (
            "starts.without",
            "The %field% must not start with one of the following: %values%",
        ),
        (
            "ends.with",
            "The %field% must end with one of the following: %values%",
        ),
        (
            "ends.without",
            "The %field% must not end with one of the following: %values%",
        ),
        ("regex", "The %field% format is invalid"),
        ("not.regex", "The %field% format is invalid"),
        ("same", "The %field% and %other% must match"),
        ("different", "The %field% and %other% must be different"),
        ("min.string", "The %field% must be at least %min% characters"),
        (
            "max.string",
            "The %field% must not be greater than %max% characters",
        ),
        ("size.string", "The %field% must be %size% characters"),
        (
            "between.string",
            "The %field% must be between %min% and %max% characters",
        ),
        ("min.number", "The %field% must be at least %min%"),
        ("max.number", "The %field% must not be greater than %max%"),
        ("size.number", "The %field% must be %size%"),
        ("between.number", "The %field% must be between %min% and %max%"),
        ("min.array", "The %field% must have at least %min% items"),
        ("max.array", "The %field% must not have more than %max% items"),
        ("size.array", "The %field% must contain %size% items"),
        (
            "between.array",
            "The %field% must have between %min% and %max% items",
        ),
        ("date.time", "The %field% is not a valid date"),
        ("date.format", "The %field% does not match the format %format%"),
        ("date.before", "The %field% must be a date before %date%"),
        ("date.after", "The %field% must be a date after %date%"),
        ("date.equals", "The %field% must be equal to %date%"),
        ("timezone", "The %field% must be a valid time zone"),
        ("ip", "The %field% must be a valid IP address"),
        ("ipv4", "The %field% must be a valid IPv4 address"),
        ("ipv6", "The %field% must be a valid IPv6 address"),
        ("mac", "The %field% must be a valid MAC address"),
        ("email", "The %field% must be a valid email address"),
        ("url", "The %field% is not a valid URL"),
        ("active.url", "The %field% is not a valid URL"),
    ]
}

//! Message composition: template lookup and placeholder substitution.

use std::collections::BTreeMap;

use heck::ToSnakeCase;

use crate::message::domain::MessageBag;
use crate::message::ports::translator::Translator;
use crate::rule::domain::Rule;

/// Namespace holding the built-in templates; consulted after the
/// configured namespace.
pub const INTERNAL_NAMESPACE: &str = "validation";

/// Translation id of the message recorded for undeclared inputs.
pub const UNEXPECTED_FIELD: &str = "_unexpected";

const CUSTOM_PREFIX: &str = "_custom";
const FIELDS_PREFIX: &str = "_fields";

/// Composes rendered failure messages for one validation run.
///
/// Lookup order for a failing rule, first hit wins:
///
/// 1. custom message `field.rule`
/// 2. custom message `rule`
/// 3. translation `_custom.field.rule`
/// 4. translation `rule`, with field and rule placeholders substituted
/// 5. the rule name itself
///
/// Translations are looked up in the configured namespace first and in
/// [`INTERNAL_NAMESPACE`] second.
#[derive(Clone, Copy)]
pub struct MessageComposer<'a> {
    translator: &'a dyn Translator,
    namespace: &'a str,
    custom_messages: Option<&'a BTreeMap<String, String>>,
    field_names: Option<&'a BTreeMap<String, String>>,
}

impl<'a> MessageComposer<'a> {
    /// Creates a composer reading templates from `translator` under
    /// `namespace`.
    #[must_use]
    pub const fn new(translator: &'a dyn Translator, namespace: &'a str) -> Self {
        Self {
            translator,
            namespace,
            custom_messages: None,
            field_names: None,
        }
    }

    /// Uses per-call messages keyed by `rule` or `field.rule`.
    #[must_use]
    pub const fn with_custom_messages(mut self, messages: &'a BTreeMap<String, String>) -> Self {
        self.custom_messages = Some(messages);
        self
    }

    /// Uses per-call display names keyed by field.
    #[must_use]
    pub const fn with_field_names(mut self, names: &'a BTreeMap<String, String>) -> Self {
        self.field_names = Some(names);
        self
    }

    /// Records the failure of `rule` on `field`.
    ///
    /// Returns `false` when the rendered text was already present for the
    /// field.
    pub fn add(
        &self,
        bag: &mut MessageBag,
        field: &str,
        rule: &dyn Rule,
        parameters: &[String],
    ) -> bool {
        bag.add(field, self.compose(field, rule, parameters))
    }

    /// Records a structural message such as [`UNEXPECTED_FIELD`].
    ///
    /// The key is translated and its field placeholders receive the raw
    /// field key; an untranslated key is stored verbatim.
    pub fn add_raw(&self, bag: &mut MessageBag, field: &str, key: &str) -> bool {
        let message = self.translation(key).map_or_else(
            || key.to_owned(),
            |template| replace_field(&template, field),
        );
        bag.add(field, message)
    }

    /// Renders the message for a failure of `rule` on `field`.
    #[must_use]
    pub fn compose(&self, field: &str, rule: &dyn Rule, parameters: &[String]) -> String {
        let name = rule.name();

        if let Some(custom) = self.custom_message(field, name) {
            return custom;
        }

        self.translation(name).map_or_else(
            || name.to_owned(),
            |template| {
                let message = replace_field(&template, &self.display_name(field));
                rule.render_placeholder(&message, parameters)
                    .unwrap_or(message)
            },
        )
    }

    /// Returns the human-readable name of `field`: the per-call name, the
    /// `_fields.<field>` translation, or the snake-cased key with spaces.
    #[must_use]
    pub fn display_name(&self, field: &str) -> String {
        if let Some(name) = self.field_names.and_then(|names| names.get(field)) {
            return name.clone();
        }

        self.translation(&format!("{FIELDS_PREFIX}.{field}"))
            .unwrap_or_else(|| derived_name(field))
    }

    fn custom_message(&self, field: &str, rule: &str) -> Option<String> {
        self.custom_messages
            .and_then(|messages| {
                messages
                    .get(&format!("{field}.{rule}"))
                    .or_else(|| messages.get(rule))
            })
            .cloned()
            .or_else(|| self.translation(&format!("{CUSTOM_PREFIX}.{field}.{rule}")))
    }

    fn translation(&self, id: &str) -> Option<String> {
        self.translator
            .get(&format!("{}.{id}", self.namespace))
            .or_else(|| {
                (self.namespace != INTERNAL_NAMESPACE)
                    .then(|| self.translator.get(&format!("{INTERNAL_NAMESPACE}.{id}")))
                    .flatten()
            })
    }
}

impl std::fmt::Debug for MessageComposer<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("MessageComposer")
            .field("namespace", &self.namespace)
            .field("custom_messages", &self.custom_messages)
            .field("field_names", &self.field_names)
            .finish_non_exhaustive()
    }
}

/// Substitutes `%field%`, `%Field%` and `%FIELD%`.
fn replace_field(template: &str, field: &str) -> String {
    template
        .replace("%field%", field)
        .replace("%Field%", &upper_first(field))
        .replace("%FIELD%", &field.to_uppercase())
}

fn upper_first(text: &str) -> String {
    let mut characters = text.chars();
    characters.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(characters).collect()
    })
}

/// `firstName`, `FirstName` and `first_name` all become `first name`.
fn derived_name(field: &str) -> String {
    field.to_snake_case().replace('_', " ")
}

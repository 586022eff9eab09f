//! The validation run: rule resolution, field iteration, and hooks.

use std::fmt;
use std::sync::Arc;

use mockable::DefaultClock;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{ValidationRequest, ValidatorConfig};
use crate::message::adapters::memory::InMemoryTranslator;
use crate::message::domain::MessageBag;
use crate::message::ports::translator::Translator;
use crate::message::services::MessageComposer;
use crate::message::services::composer::UNEXPECTED_FIELD;
use crate::rule::RuleRegistry;
use crate::rule::builtin::{BAIL, NULLABLE, SharedClock};
use crate::rule::domain::{ConfigurationResult, Inputs, Rule, RuleSpec};

/// Callback run before each validation or before each validity check.
pub type ValidationHook = Box<dyn Fn(&Validator) + Send + Sync>;

static NULL: Value = Value::Null;

/// Validates inputs against per-field rule strings.
///
/// A validator keeps its rule cache, custom rules and hooks across runs;
/// each [`Validator::validate`] call rebuilds the message bag from scratch.
/// Mutating calls take `&mut self`, so concurrent use needs a lock around
/// the `validate`/`errors` pair or one validator per thread.
///
/// # Examples
///
/// ```
/// use fieldcheck::validator::{ValidationRequest, Validator};
/// use serde_json::json;
///
/// let mut validator = Validator::new();
/// let request = ValidationRequest::from_value(json!({"name": ""}))
///     .with_rules("name", "required");
///
/// validator.validate(&request).expect("rules are well-formed");
///
/// assert!(!validator.is_valid());
/// assert_eq!(
///     validator.errors().first(Some("name")),
///     Some("The name field is required")
/// );
/// ```
pub struct Validator {
    registry: RuleRegistry,
    translator: Arc<dyn Translator>,
    config: ValidatorConfig,
    messages: MessageBag,
    before_hooks: Vec<ValidationHook>,
    after_hooks: Vec<ValidationHook>,
}

impl Validator {
    /// Creates a validator with the default configuration, the English
    /// templates, and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::new(Arc::new(DefaultClock)),
            translator: Arc::new(InMemoryTranslator::new()),
            config: ValidatorConfig::default(),
            messages: MessageBag::new(),
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the translator used for templates and field names.
    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Replaces the clock that anchors relative dates.
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.registry.set_clock(clock);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `request`, replacing the previous messages.
    ///
    /// Before-hooks run first, then undeclared inputs are reported when
    /// extra inputs are disallowed, then each declared field is evaluated
    /// in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::rule::domain::ConfigurationError`] for an unknown
    /// rule name or a misused rule. The message bag is left empty.
    pub fn validate(&mut self, request: &ValidationRequest) -> ConfigurationResult<()> {
        self.messages = MessageBag::new();

        for hook in &self.before_hooks {
            hook(self);
        }

        debug!(fields = request.rules().len(), "validating inputs");

        let composer = MessageComposer::new(self.translator.as_ref(), &self.config.namespace)
            .with_custom_messages(request.custom_messages())
            .with_field_names(request.field_names());
        let mut messages = MessageBag::new();

        let allow_extra_inputs = request
            .allows_extra_inputs()
            .unwrap_or(self.config.allow_extra_inputs);
        if !allow_extra_inputs {
            report_unexpected(request, &composer, &mut messages);
        }

        for (field, rules) in request.rules() {
            if let Err(error) = evaluate_field(
                &mut self.registry,
                &composer,
                &mut messages,
                field,
                rules,
                request.inputs(),
            ) {
                warn!(field = %field, error = %error, "validation aborted by configuration error");
                return Err(error);
            }
        }

        self.messages = messages;
        Ok(())
    }

    /// Runs the after-hooks, then reports whether the last run produced no
    /// messages.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        for hook in &self.after_hooks {
            hook(self);
        }
        self.messages.is_empty()
    }

    /// Returns the messages of the last run.
    #[must_use]
    pub const fn errors(&self) -> &MessageBag {
        &self.messages
    }

    /// Registers a custom rule under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::rule::domain::ConfigurationError::DuplicateRule`]
    /// when the name is taken by a built-in, cached, or registered rule.
    pub fn add_rule(
        &mut self,
        name: &str,
        rule: Arc<dyn Rule>,
    ) -> ConfigurationResult<&mut Self> {
        self.registry.register(name, rule)?;
        Ok(self)
    }

    /// Appends a hook run at the start of every [`Validator::validate`].
    pub fn add_before_validation_hook(
        &mut self,
        hook: impl Fn(&Self) + Send + Sync + 'static,
    ) -> &mut Self {
        self.before_hooks.push(Box::new(hook));
        self
    }

    /// Appends a hook run at the start of every [`Validator::is_valid`].
    pub fn add_after_validation_hook(
        &mut self,
        hook: impl Fn(&Self) + Send + Sync + 'static,
    ) -> &mut Self {
        self.after_hooks.push(Box::new(hook));
        self
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Validator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("messages", &self.messages)
            .field("before_hooks", &self.before_hooks.len())
            .field("after_hooks", &self.after_hooks.len())
            .finish_non_exhaustive()
    }
}

fn report_unexpected(
    request: &ValidationRequest,
    composer: &MessageComposer<'_>,
    messages: &mut MessageBag,
) {
    for field in request.inputs().keys() {
        if !request.rules().contains_key(field) {
            trace!(field = %field, "input has no rules");
            composer.add_raw(messages, field, UNEXPECTED_FIELD);
        }
    }
}

fn evaluate_field(
    registry: &mut RuleRegistry,
    composer: &MessageComposer<'_>,
    messages: &mut MessageBag,
    field: &str,
    rules: &str,
    inputs: &Inputs,
) -> ConfigurationResult<()> {
    let specs = RuleSpec::parse_list(rules);
    let resolved = specs
        .iter()
        .map(|spec| registry.resolve(spec.name()).map(|rule| (spec, rule)))
        .collect::<ConfigurationResult<Vec<_>>>()?;

    let value = inputs.get(field).unwrap_or(&NULL);
    if value.is_null() && specs.iter().any(|spec| spec.is(NULLABLE)) {
        trace!(field, "skipping null nullable field");
        return Ok(());
    }
    let bail = specs.iter().any(|spec| spec.is(BAIL));

    for (spec, rule) in resolved {
        if spec.is(BAIL) || spec.is(NULLABLE) {
            continue;
        }

        if !rule.evaluate(field, value, spec.parameters(), inputs)? {
            trace!(field, rule = rule.name(), "rule failed");
            composer.add(messages, field, rule.as_ref(), spec.parameters());
        }

        if bail && messages.has(field) {
            break;
        }
    }

    Ok(())
}

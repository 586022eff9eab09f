//! Name-to-rule resolution with lazy built-ins and custom registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::rule::builtin::{SharedClock, builtin_rule, is_builtin};
use crate::rule::domain::{ConfigurationError, ConfigurationResult, Rule};

/// Registry of rule instances keyed by registry name.
///
/// Built-in rules are constructed on first use and cached; custom rules are
/// stored when registered. A name never maps to two different instances.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use fieldcheck::rule::RuleRegistry;
/// use mockable::DefaultClock;
///
/// let mut registry = RuleRegistry::new(Arc::new(DefaultClock));
/// let rule = registry.resolve("min_string").expect("built-in rule");
/// assert_eq!(rule.name(), "min.string");
/// assert!(registry.resolve("banana").is_err());
/// ```
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
    clock: SharedClock,
}

impl RuleRegistry {
    /// Creates an empty registry whose date rules read `clock`.
    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            rules: HashMap::new(),
            clock,
        }
    }

    /// Replaces the clock, discarding cached built-ins built with the old
    /// one. Custom rules are kept.
    pub fn set_clock(&mut self, clock: SharedClock) {
        self.rules.retain(|name, _| !is_builtin(name));
        self.clock = clock;
    }

    /// Returns the clock shared with date rules.
    #[must_use]
    pub const fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Resolves a registry name, constructing and caching a built-in rule
    /// on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidRuleName`] when neither a custom
    /// nor a built-in rule has this name.
    pub fn resolve(&mut self, name: &str) -> ConfigurationResult<Arc<dyn Rule>> {
        if let Some(rule) = self.rules.get(name) {
            return Ok(Arc::clone(rule));
        }

        let rule = builtin_rule(name, &self.clock)
            .ok_or_else(|| ConfigurationError::InvalidRuleName(name.to_owned()))?;
        debug!(rule = name, "resolved built-in validation rule");
        self.rules.insert(name.to_owned(), Arc::clone(&rule));
        Ok(rule)
    }

    /// Registers a custom rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateRule`] when the name is already
    /// cached, already registered, or belongs to a built-in rule.
    pub fn register(&mut self, name: &str, rule: Arc<dyn Rule>) -> ConfigurationResult<()> {
        if self.rules.contains_key(name) || is_builtin(name) {
            return Err(ConfigurationError::DuplicateRule(name.to_owned()));
        }

        debug!(rule = name, display_name = rule.name(), "registered custom validation rule");
        self.rules.insert(name.to_owned(), rule);
        Ok(())
    }

    /// Returns `true` when `name` is cached or registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Returns the number of cached and registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when nothing has been cached or registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.rules.keys().collect();
        names.sort();
        formatter
            .debug_struct("RuleRegistry")
            .field("rules", &names)
            .finish_non_exhaustive()
    }
}

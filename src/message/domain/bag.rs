//! Per-field collection of rendered validation messages.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from field name to its distinct rendered messages.
///
/// Fields keep the order in which they first failed; each field's messages
/// keep insertion order and never repeat.
///
/// # Examples
///
/// ```
/// use fieldcheck::message::domain::MessageBag;
///
/// let mut bag = MessageBag::new();
/// assert!(bag.add("name", "The name field is required"));
/// assert!(!bag.add("name", "The name field is required"));
///
/// assert_eq!(bag.first(Some("name")), Some("The name field is required"));
/// assert_eq!(bag.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBag {
    messages: IndexMap<String, Vec<String>>,
}

impl MessageBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to `field` unless that exact text is already there.
    ///
    /// Returns `true` when the message was stored.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> bool {
        let text = message.into();
        let entries = self.messages.entry(field.into()).or_default();
        if entries.contains(&text) {
            return false;
        }
        entries.push(text);
        true
    }

    /// Returns the first message of `field`, or of the first failing field
    /// when `field` is `None`.
    #[must_use]
    pub fn first(&self, field: Option<&str>) -> Option<&str> {
        let entries = field.map_or_else(
            || self.messages.values().next(),
            |name| self.messages.get(name),
        )?;
        entries.first().map(String::as_str)
    }

    /// Returns every message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.messages.get(field).map_or(&[], Vec::as_slice)
    }

    /// Returns the whole field-to-messages map in failure order.
    #[must_use]
    pub const fn all(&self) -> &IndexMap<String, Vec<String>> {
        &self.messages
    }

    /// Returns every message of every field as one list, field by field.
    #[must_use]
    pub fn flattened(&self) -> Vec<&str> {
        self.messages
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Returns `true` when `field` has at least one message.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.messages
            .get(field)
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Returns `true` when no field has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.values().all(Vec::is_empty)
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Returns the total number of messages across all fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Iterates over `(field, messages)` pairs in failure order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, entries)| (field.as_str(), entries.as_slice()))
    }
}

impl<'a> IntoIterator for &'a MessageBag {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

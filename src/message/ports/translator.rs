//! Translator port for message templates and field names.
//!
//! The composer asks the translator for dotted keys such as
//! `validation.required`, `_custom.email.required` or `_fields.first_name`.
//! Locale selection and fallback are the implementation's concern.

/// Resolves translation keys to message templates.
pub trait Translator: Send + Sync {
    /// Returns the template stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns `true` when `key` has a translation.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

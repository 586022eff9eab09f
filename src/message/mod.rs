//! Validation messages: collection, translation, and composition.
//!
//! # Architecture
//!
//! - **Domain**: [`domain::MessageBag`], the per-field message collection
//! - **Ports**: [`ports::translator::Translator`], the template lookup
//! - **Adapters**: [`adapters::memory::InMemoryTranslator`] with English
//!   defaults
//! - **Services**: [`services::MessageComposer`], which resolves templates
//!   and substitutes placeholders
//!
//! # Example
//!
//! ```
//! use fieldcheck::message::adapters::memory::InMemoryTranslator;
//! use fieldcheck::message::domain::MessageBag;
//! use fieldcheck::message::services::MessageComposer;
//!
//! let translator = InMemoryTranslator::new();
//! let composer = MessageComposer::new(&translator, "validation");
//! let mut bag = MessageBag::new();
//!
//! composer.add_raw(&mut bag, "token", "_unexpected");
//! assert_eq!(bag.first(Some("token")), Some("Token was not expected"));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

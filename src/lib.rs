//! Fieldcheck: rule-string driven input validation.
//!
//! Inputs are checked against compact per-field rule strings such as
//! `required|between_string:2,32`, and failures are collected as
//! human-readable, localizable messages.
//!
//! # Architecture
//!
//! - **Rules** ([`rule`]): the rule contract, the rule-string grammar, the
//!   built-in rule set, and the registry that resolves rule names
//! - **Messages** ([`message`]): the message bag, the translator port with an
//!   in-memory adapter, and the composer that renders templates
//! - **Validator** ([`validator`]): the validation run tying both together
//!
//! Data that fails a rule becomes a message; misuse of the rule system (an
//! unknown rule, missing parameters) is a
//! [`rule::domain::ConfigurationError`] that aborts the run.
//!
//! # Example
//!
//! ```
//! use fieldcheck::validator::{ValidationRequest, Validator};
//! use serde_json::json;
//!
//! let mut validator = Validator::new();
//! let request = ValidationRequest::from_value(json!({
//!     "name": "",
//!     "age": null,
//!     "email": "merloxx@example.com",
//! }))
//! .with_rules("name", "required|min_string:2")
//! .with_rules("age", "nullable|integer|min_number:18")
//! .with_rules("email", "required|email");
//!
//! validator.validate(&request).expect("rules are well-formed");
//!
//! assert!(!validator.is_valid());
//! assert_eq!(
//!     validator.errors().get("name"),
//!     [
//!         "The name field is required",
//!         "The name must be at least 2 characters",
//!     ]
//! );
//! assert!(!validator.errors().has("age"));
//! ```

pub mod message;
pub mod rule;
pub mod validator;

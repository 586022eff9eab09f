//! Validation rules.
//!
//! This module owns the rule contract and rule-string grammar
//! ([`domain`]), the shipped rule set ([`builtin`]), and the
//! [`RuleRegistry`] that resolves rule names to shared instances.

pub mod builtin;
pub mod domain;
mod registry;

pub use registry::RuleRegistry;

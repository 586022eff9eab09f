//! The validator: runs rule strings over inputs and collects messages.

mod config;
mod request;
mod service;

pub use config::ValidatorConfig;
pub use request::ValidationRequest;
pub use service::{ValidationHook, Validator};

#[cfg(test)]
mod tests;

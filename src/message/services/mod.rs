//! Message services.

pub mod composer;

pub use composer::MessageComposer;

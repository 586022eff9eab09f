//! Message domain types.

mod bag;

pub use bag::MessageBag;

//! Port definitions for the message context.

pub mod translator;

//! Unit tests for the validator.
//!
//! Tests are organised by behaviour: control markers, message handling,
//! rule registration, and hooks.

mod control_flow_tests;

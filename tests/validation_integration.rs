//! Behavioural integration tests for the validation run.
//!
//! These tests drive the public API end to end: a request is built from a
//! JSON document, validated against rule strings, and the resulting message
//! bag is inspected.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use fieldcheck::message::adapters::memory::InMemoryTranslator;
use fieldcheck::rule::domain::ConfigurationError;
use fieldcheck::validator::{ValidationRequest, Validator, ValidatorConfig};
use mockable::Clock;
use serde_json::json;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// Scenario: A well-formed signup form passes
// ============================================================================

/// When every field satisfies its rules, the validator reports no messages.
#[test]
fn complete_signup_form_is_valid() {
    // Arrange
    let mut validator = Validator::new();
    let request = ValidationRequest::from_value(json!({
        "username": "merloxx",
        "email": "merloxx@example.com",
        "password": "hunter2hunter2",
        "password_confirmation": "hunter2hunter2",
        "age": 32,
        "tags": ["rust", "validation"],
        "website": "https://example.com/about",
        "nickname": null,
    }))
    .with_rules("username", "required|alpha_dash|between_string:3,16")
    .with_rules("email", "required|email")
    .with_rules("password", "required|min_string:8")
    .with_rules("password_confirmation", "same:password")
    .with_rules("age", "integer|between_number:18,120")
    .with_rules("tags", "array|max_array:5")
    .with_rules("website", "url")
    .with_rules("nickname", "nullable|string|min_string:2");

    // Act
    validator
        .validate(&request)
        .expect("rules should be well-formed");

    // Assert
    assert!(
        validator.is_valid(),
        "unexpected messages: {:?}",
        validator.errors().flattened()
    );
}

// ============================================================================
// Scenario: Every failing field is reported in rule order
// ============================================================================

/// Messages are grouped by field in the order the rules were declared, and
/// the first message overall belongs to the first failing field.
#[test]
fn failing_fields_are_reported_in_declaration_order() {
    // Arrange
    let mut validator = Validator::new();
    let request = ValidationRequest::from_value(json!({
        "name": "",
        "password": "abc",
        "password_confirmation": "abd",
        "tags": [],
    }))
    .with_rules("name", "required")
    .with_rules("password", "min_string:8|not_regex:/^[a-z]+$/")
    .with_rules("password_confirmation", "same:password")
    .with_rules("tags", "array|min_array:1");

    // Act
    validator
        .validate(&request)
        .expect("rules should be well-formed");

    // Assert
    let errors = validator.errors();
    assert_eq!(errors.first(None), Some("The name field is required"));
    assert_eq!(
        errors.get("password"),
        [
            "The password must be at least 8 characters",
            "The password format is invalid",
        ]
    );
    assert_eq!(
        errors.first(Some("password_confirmation")),
        Some("The password confirmation and password must match")
    );
    assert_eq!(
        errors.first(Some("tags")),
        Some("The tags must have at least 1 items")
    );
    assert_eq!(errors.len(), 4);
}

// ============================================================================
// Scenario: Relative dates follow the injected clock
// ============================================================================

/// Date expressions such as `tomorrow` are anchored on the validator's
/// clock, not the wall clock.
#[test]
fn relative_dates_use_the_validator_clock() {
    // Arrange
    let now = Utc
        .with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
        .single()
        .expect("fixed instant should be valid");
    let mut validator = Validator::new().with_clock(Arc::new(FixedClock(now)));
    let request = ValidationRequest::from_value(json!({
        "starts_at": "2024-03-12",
        "ends_at": "2024-03-11",
        "born_on": "2030-01-01",
    }))
    .with_rules("starts_at", "date_after:tomorrow")
    .with_rules("ends_at", "date_after:starts_at")
    .with_rules("born_on", "date_before:today");

    // Act
    validator
        .validate(&request)
        .expect("rules should be well-formed");

    // Assert
    assert!(!validator.errors().has("starts_at"));
    assert_eq!(
        validator.errors().first(Some("ends_at")),
        Some("The ends at must be a date after starts_at")
    );
    assert_eq!(
        validator.errors().first(Some("born_on")),
        Some("The born on must be a date before today")
    );
}

// ============================================================================
// Scenario: Messages come from the active locale
// ============================================================================

/// A JSON translation bundle supplies templates and display names for the
/// active locale while untranslated rules fall back to English.
#[test]
fn json_bundle_translates_messages_and_field_names() {
    // Arrange
    let translator = InMemoryTranslator::new()
        .with_json_messages(
            "de",
            r#"{
                "validation": {
                    "required": "Das Feld %field% ist erforderlich",
                    "_fields": { "first_name": "Vorname" }
                }
            }"#,
        )
        .expect("bundle should be a JSON object")
        .with_locale("de");
    let mut validator = Validator::new().with_translator(Arc::new(translator));
    let request = ValidationRequest::from_value(json!({"first_name": "", "age": "alt"}))
        .with_rules("first_name", "required")
        .with_rules("age", "integer");

    // Act
    validator
        .validate(&request)
        .expect("rules should be well-formed");

    // Assert
    assert_eq!(
        validator.errors().first(Some("first_name")),
        Some("Das Feld Vorname ist erforderlich")
    );
    assert_eq!(
        validator.errors().first(Some("age")),
        Some("The age must be an integer")
    );
}

// ============================================================================
// Scenario: Extra inputs under a strict configuration
// ============================================================================

/// A strict validator reports inputs that have no rules, while a request may
/// opt back in to extra inputs.
#[test]
fn strict_configuration_reports_unexpected_inputs() {
    // Arrange
    let mut validator = Validator::new().with_config(ValidatorConfig::strict());
    let inputs = json!({"name": "merloxx", "extra": "surprise"});

    // Act
    validator
        .validate(&ValidationRequest::from_value(inputs.clone()).with_rules("name", "required"))
        .expect("rules should be well-formed");
    let strict_errors = validator.errors().clone();

    validator
        .validate(
            &ValidationRequest::from_value(inputs)
                .with_rules("name", "required")
                .allow_extra_inputs(true),
        )
        .expect("rules should be well-formed");

    // Assert
    assert_eq!(strict_errors.get("extra"), ["Extra was not expected"]);
    assert!(!strict_errors.has("name"));
    assert!(validator.is_valid());
}

// ============================================================================
// Scenario: Misconfigured rules abort the run
// ============================================================================

/// Configuration errors surface through `Result` and never as messages.
#[test]
fn misconfigured_rules_abort_without_messages() {
    // Arrange
    let mut validator = Validator::new();

    // Act
    let unknown = validator.validate(
        &ValidationRequest::from_value(json!({"name": ""}))
            .with_rules("name", "required|banana"),
    );
    let unknown_errors_empty = validator.errors().is_empty();
    let bad_pattern = validator.validate(
        &ValidationRequest::from_value(json!({"code": "x"})).with_rules("code", "regex:[a-z"),
    );

    // Assert
    assert_eq!(
        unknown,
        Err(ConfigurationError::InvalidRuleName("banana".to_owned()))
    );
    assert!(unknown_errors_empty);
    assert!(matches!(
        bad_pattern,
        Err(ConfigurationError::InvalidPattern { .. })
    ));
}

// ============================================================================
// Scenario: The message bag serializes as a field map
// ============================================================================

/// The bag serializes to a JSON object of field name to message list, which
/// is how callers hand errors back to clients.
#[test]
fn message_bag_serializes_as_field_map() {
    // Arrange
    let mut validator = Validator::new();
    let request = ValidationRequest::from_value(json!({"name": "", "mac": "zz:zz"}))
        .with_rules("name", "required")
        .with_rules("mac", "mac");

    // Act
    validator
        .validate(&request)
        .expect("rules should be well-formed");
    let serialized = serde_json::to_value(validator.errors()).expect("bag should serialize");

    // Assert
    assert_eq!(
        serialized,
        json!({
            "name": ["The name field is required"],
            "mac": ["The mac must be a valid MAC address"],
        })
    );
}

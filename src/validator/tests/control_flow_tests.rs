//! Field iteration, `nullable`, `bail`, and extra-input handling.

use rstest::{fixture, rstest};
use serde_json::json;

use crate::rule::domain::ConfigurationError;
use crate::validator::{ValidationRequest, Validator, ValidatorConfig};

#[fixture]
fn validator() -> Validator {
    Validator::new()
}

#[rstest]
fn fields_without_rules_are_never_evaluated(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"name": "", "nick": ""}))
        .with_rules("name", "required");

    validator.validate(&request).expect("rules are valid");

    assert!(validator.errors().has("name"));
    assert!(!validator.errors().has("nick"));
}

#[rstest]
fn missing_inputs_are_treated_as_null(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({})).with_rules("email", "required");

    validator.validate(&request).expect("rules are valid");

    assert_eq!(
        validator.errors().first(Some("email")),
        Some("The email field is required")
    );
}

#[rstest]
#[case("nullable|min_number:20")]
#[case("min_number:20|nullable")]
#[case("required|nullable|string")]
fn nullable_null_field_yields_no_messages_wherever_the_marker_sits(
    mut validator: Validator,
    #[case] rules: &str,
) {
    let request = ValidationRequest::from_value(json!({"value": null})).with_rules("value", rules);

    validator.validate(&request).expect("rules are valid");

    assert!(validator.is_valid());
}

#[rstest]
fn nullable_does_not_short_circuit_sibling_fields(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"value": null, "name": ""}))
        .with_rules("value", "nullable|min_number:20")
        .with_rules("name", "required");

    validator.validate(&request).expect("rules are valid");

    assert!(!validator.errors().has("value"));
    assert!(validator.errors().has("name"));
}

#[rstest]
fn nullable_still_validates_present_values(mut validator: Validator) {
    let request =
        ValidationRequest::from_value(json!({"value": 5})).with_rules("value", "nullable|min_number:20");

    validator.validate(&request).expect("rules are valid");

    assert_eq!(
        validator.errors().get("value"),
        ["The value must be at least 20"]
    );
}

#[rstest]
#[case("bail|integer|min_string:3|email")]
#[case("integer|bail|min_string:3|email")]
fn bail_keeps_only_the_first_failure(mut validator: Validator, #[case] rules: &str) {
    let request = ValidationRequest::from_value(json!({"code": "ab"})).with_rules("code", rules);

    validator.validate(&request).expect("rules are valid");

    assert_eq!(
        validator.errors().get("code"),
        ["The code must be an integer"]
    );
}

#[rstest]
fn without_bail_every_failure_is_reported(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"code": "ab"}))
        .with_rules("code", "integer|min_string:3|email");

    validator.validate(&request).expect("rules are valid");

    assert_eq!(validator.errors().get("code").len(), 3);
}

#[rstest]
fn disallowed_extra_inputs_are_reported_by_key(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"name": "merloxx", "extra_field": 1}))
        .with_rules("name", "required")
        .allow_extra_inputs(false);

    validator.validate(&request).expect("rules are valid");

    assert!(!validator.is_valid());
    assert_eq!(
        validator.errors().get("extra_field"),
        ["Extra_field was not expected"]
    );
    assert!(!validator.errors().has("name"));
}

#[rstest]
fn configuration_sets_the_extra_input_default() {
    let mut validator = Validator::new().with_config(ValidatorConfig::strict());
    assert!(!validator.config().allow_extra_inputs);
    assert_eq!(validator.config().namespace, "validation");
    let inputs = json!({"name": "merloxx", "extra": 1});

    validator
        .validate(&ValidationRequest::from_value(inputs.clone()).with_rules("name", "required"))
        .expect("rules are valid");
    assert!(validator.errors().has("extra"));

    validator
        .validate(
            &ValidationRequest::from_value(inputs)
                .with_rules("name", "required")
                .allow_extra_inputs(true),
        )
        .expect("rules are valid");
    assert!(validator.is_valid());
}

#[rstest]
fn unknown_rule_aborts_and_leaves_no_messages(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"name": "", "pet": "cat"}))
        .with_rules("name", "required")
        .with_rules("pet", "banana");

    let error = validator.validate(&request).expect_err("banana is not a rule");

    assert_eq!(error, ConfigurationError::InvalidRuleName("banana".to_owned()));
    assert!(validator.errors().is_empty());
}

#[rstest]
fn unknown_rule_on_nullable_null_field_still_aborts(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"pet": null})).with_rules("pet", "nullable|banana");

    assert!(matches!(
        validator.validate(&request),
        Err(ConfigurationError::InvalidRuleName(name)) if name == "banana"
    ));
}

#[rstest]
fn missing_parameters_abort_validation(mut validator: Validator) {
    let request =
        ValidationRequest::from_value(json!({"age": 30})).with_rules("age", "between_number:18");

    assert!(matches!(
        validator.validate(&request),
        Err(ConfigurationError::MissingParameters { required: 2, .. })
    ));
}

#[rstest]
fn repeated_runs_produce_identical_bags(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"name": "", "age": "x"}))
        .with_rules("name", "required|min_string:2")
        .with_rules("age", "integer");

    validator.validate(&request).expect("rules are valid");
    let first = validator.errors().clone();
    validator.validate(&request).expect("rules are valid");

    assert_eq!(validator.errors(), &first);
}

#[rstest]
fn a_later_run_does_not_leak_earlier_messages(mut validator: Validator) {
    validator
        .validate(&ValidationRequest::from_value(json!({"name": ""})).with_rules("name", "required"))
        .expect("rules are valid");
    assert!(!validator.is_valid());

    validator
        .validate(&ValidationRequest::from_value(json!({"name": "merloxx"})).with_rules("name", "required"))
        .expect("rules are valid");
    assert!(validator.is_valid());
}

#[rstest]
fn different_fails_for_equal_sibling(mut validator: Validator) {
    let request =
        ValidationRequest::from_value(json!({"a": "x", "b": "x"})).with_rules("b", "different:a");

    validator.validate(&request).expect("rules are valid");

    assert_eq!(
        validator.errors().first(Some("b")),
        Some("The b and a must be different")
    );
}

#[rstest]
fn regex_parameters_keep_their_commas(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"code": "aaa"}))
        .with_rules("code", "regex:/^a{1,3}$/");

    validator.validate(&request).expect("rules are valid");

    assert!(validator.is_valid());
}

#[rstest]
#[case("2023-01-01 15", "date_format:Y-m-d H")]
#[case("2023 15:00", "date_format:Y H:i")]
fn date_format_accepts_formats_mixing_date_and_time(
    mut validator: Validator,
    #[case] when: &str,
    #[case] rules: &str,
) {
    let request = ValidationRequest::from_value(json!({"when": when})).with_rules("when", rules);

    validator.validate(&request).expect("rules are valid");

    assert!(validator.is_valid());
}

#[rstest]
fn date_format_reports_values_that_do_not_round_trip(mut validator: Validator) {
    let request = ValidationRequest::from_value(json!({"when": "2023-01-01"}))
        .with_rules("when", "date_format:Y-m-d H");

    validator.validate(&request).expect("rules are valid");

    assert_eq!(
        validator.errors().first(Some("when")),
        Some("The when does not match the format Y-m-d H")
    );
}

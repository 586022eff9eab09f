//! Behavioural tests for rule-string validation.

use std::sync::Arc;

use eyre::{Result, eyre};
use fieldcheck::rule::domain::{ConfigurationError, ConfigurationResult, Inputs, Rule};
use fieldcheck::validator::{ValidationRequest, Validator, ValidatorConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

struct Banana;

impl Rule for Banana {
    fn name(&self) -> &str {
        "banana"
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        _parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        Ok(value.as_str() == Some("banana"))
    }
}

#[derive(Default)]
struct ValidationWorld {
    validator: Validator,
    inputs: Inputs,
    rules: Vec<(String, String)>,
    outcome: Option<ConfigurationResult<()>>,
    registration: Option<ConfigurationResult<()>>,
}

impl ValidationWorld {
    fn request(&self) -> ValidationRequest {
        self.rules.iter().fold(
            ValidationRequest::new(self.inputs.clone()),
            |request, (field, rules)| request.with_rules(field.as_str(), rules.as_str()),
        )
    }
}

#[fixture]
fn world() -> ValidationWorld {
    ValidationWorld::default()
}

#[given("a validator with the default configuration")]
fn default_validator(world: &mut ValidationWorld) {
    world.validator = Validator::new();
}

#[given("a validator that rejects extra inputs")]
fn strict_validator(world: &mut ValidationWorld) {
    world.validator = Validator::new().with_config(ValidatorConfig::strict());
}

#[given(r#"the input "{field}" is empty"#)]
fn empty_input(world: &mut ValidationWorld, field: String) {
    world.inputs.insert(field, Value::String(String::new()));
}

#[given(r#"the input "{field}" is null"#)]
fn null_input(world: &mut ValidationWorld, field: String) {
    world.inputs.insert(field, Value::Null);
}

#[given(r#"the input "{field}" is the text "{text}""#)]
fn text_input(world: &mut ValidationWorld, field: String, text: String) {
    world.inputs.insert(field, Value::String(text));
}

#[given(r#"the input "{field}" is the number {number:i64}"#)]
fn number_input(world: &mut ValidationWorld, field: String, number: i64) {
    world.inputs.insert(field, Value::from(number));
}

#[given(r#"the field "{field}" has the rules "{rules}""#)]
fn field_rules(world: &mut ValidationWorld, field: String, rules: String) {
    world.rules.push((field, rules));
}

#[given(r#"a custom rule named "{name}" is registered"#)]
fn custom_rule_registered(world: &mut ValidationWorld, name: String) -> Result<()> {
    world
        .validator
        .add_rule(&name, Arc::new(Banana))
        .map_err(|err| eyre!("registering {name} failed: {err}"))?;
    Ok(())
}

#[when("the inputs are validated")]
fn inputs_validated(world: &mut ValidationWorld) {
    let request = world.request();
    world.outcome = Some(world.validator.validate(&request));
}

#[when(r#"another rule named "{name}" is registered"#)]
fn another_rule_registered(world: &mut ValidationWorld, name: String) {
    world.registration = Some(
        world
            .validator
            .add_rule(&name, Arc::new(Banana))
            .map(|_| ()),
    );
}

#[then("validation completes")]
fn validation_completes(world: &ValidationWorld) -> Result<()> {
    let outcome = world
        .outcome
        .as_ref()
        .ok_or_else(|| eyre!("inputs were never validated"))?;
    outcome
        .as_ref()
        .map_err(|err| eyre!("validation aborted: {err}"))?;
    Ok(())
}

#[then("the inputs are valid")]
fn inputs_valid(world: &ValidationWorld) -> Result<()> {
    if !world.validator.is_valid() {
        return Err(eyre!(
            "expected no messages, found {:?}",
            world.validator.errors().flattened()
        ));
    }
    Ok(())
}

#[then(r#"the field "{field}" has the message "{message}""#)]
fn field_has_message(world: &ValidationWorld, field: String, message: String) -> Result<()> {
    let messages = world.validator.errors().get(&field);
    if !messages.contains(&message) {
        return Err(eyre!("expected {message:?} for {field}, found {messages:?}"));
    }
    Ok(())
}

#[then(r#"the field "{field}" has {count:usize} messages"#)]
fn field_message_count(world: &ValidationWorld, field: String, count: usize) -> Result<()> {
    let messages = world.validator.errors().get(&field);
    if messages.len() != count {
        return Err(eyre!(
            "expected {count} messages for {field}, found {messages:?}"
        ));
    }
    Ok(())
}

#[then(r#"the field "{field}" has no messages"#)]
fn field_has_no_messages(world: &ValidationWorld, field: String) -> Result<()> {
    if world.validator.errors().has(&field) {
        return Err(eyre!(
            "expected {field} to pass, found {:?}",
            world.validator.errors().get(&field)
        ));
    }
    Ok(())
}

#[then("the registration is refused as a duplicate")]
fn registration_refused(world: &ValidationWorld) -> Result<()> {
    let registration = world
        .registration
        .as_ref()
        .ok_or_else(|| eyre!("expected a registration attempt"))?;

    assert!(matches!(
        registration,
        Err(ConfigurationError::DuplicateRule(name)) if name == "banana"
    ));
    Ok(())
}

#[then(r#"validation aborts on the unknown rule "{name}""#)]
fn validation_aborts(world: &ValidationWorld, name: String) -> Result<()> {
    let outcome = world
        .outcome
        .as_ref()
        .ok_or_else(|| eyre!("inputs were never validated"))?;

    assert_eq!(outcome, &Err(ConfigurationError::InvalidRuleName(name)));
    Ok(())
}

#[then("no messages are recorded")]
fn no_messages_recorded(world: &ValidationWorld) -> Result<()> {
    if !world.validator.errors().is_empty() {
        return Err(eyre!(
            "expected an empty bag, found {:?}",
            world.validator.errors().flattened()
        ));
    }
    Ok(())
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "Empty required field is reported"
)]
fn empty_required_field(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "Nullable field holding null is skipped"
)]
fn nullable_null_field(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "Bail stops at the first failing rule"
)]
fn bail_first_failure(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "Unexpected input is rejected by a strict validator"
)]
fn unexpected_input_rejected(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "Registering a rule name twice is refused"
)]
fn duplicate_registration(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "Unknown rule aborts validation"
)]
fn unknown_rule_aborts(world: ValidationWorld) {
    let _ = world;
}

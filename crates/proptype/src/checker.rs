//! The validation pipeline.
//!
//! A [`Checker`] inspects one named value in a record:
//!
//! 1. required check (presence of the key, not truthiness of the value);
//! 2. a missing or `null` value passes;
//! 3. kind gate;
//! 4. validator chain, stopping at the first failing validator.
//!
//! Predicate faults in steps 3-4 are reported as
//! [`ErrorKind::Internal`] errors and never reach the caller as panics.
//!
//! # Examples
//!
//! ```rust
//! use proptype::foundation::{ErrorKind, FieldContext};
//! use proptype::{Checker, PrimitiveKind, predicate};
//! use serde_json::{Value, json};
//!
//! fn is_positive(value: &Value) -> bool {
//!     value.as_f64().is_some_and(|n| n > 0.0)
//! }
//!
//! let count = Checker::of_kind(PrimitiveKind::Number, predicate!(is_positive))?;
//! let record = json!({ "count": -1 }).as_object().cloned().unwrap_or_default();
//! let ctx = FieldContext::new("count").entity("Counter");
//!
//! let error = count.check(&record, &ctx).unwrap_err();
//! assert_eq!(error.kind, ErrorKind::InvalidValue);
//! assert!(error.message.contains("`is_positive`"));
//!
//! assert_eq!(count.required().check(&Default::default(), &ctx).unwrap_err().kind, ErrorKind::Required);
//! # Ok::<(), proptype::ConstructionError>(())
//! ```

use crate::factory::{CheckerConfig, ValueValidator};
use crate::foundation::{
    CheckField, ErrorKind, FieldContext, Record, ValidationError, ValidationResult, is_absent,
    kind_of,
};
use crate::predicate::PredicateFault;
use serde_json::Value;
use std::sync::Arc;

/// A reusable field checker.
///
/// Cloning is cheap; the optional and required forms share one
/// [`CheckerConfig`].
#[derive(Debug, Clone)]
pub struct Checker {
    config: Arc<CheckerConfig>,
    required: bool,
}

impl Checker {
    pub(crate) fn from_config(config: CheckerConfig) -> Self {
        Self {
            config: Arc::new(config),
            required: false,
        }
    }

    /// The required form of this checker: a missing key is an error.
    #[must_use]
    pub fn required(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            required: true,
        }
    }

    /// The optional form of this checker.
    #[must_use]
    pub fn optional(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            required: false,
        }
    }

    /// Whether this is the required form.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The shared configuration.
    #[must_use]
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Checks `ctx.field_name()` in `record`.
    pub fn check(&self, record: &Record, ctx: &FieldContext<'_>) -> ValidationResult {
        let field = ctx.field_name();

        if self.required && !record.contains_key(field) {
            tracing::trace!(field, "required field missing");
            return Err(missing_required(ctx));
        }

        let Some(value) = record.get(field).filter(|value| !is_absent(Some(*value))) else {
            return Ok(());
        };

        match self.run(value, ctx) {
            Ok(outcome) => outcome,
            Err(fault) => {
                tracing::warn!(error = %fault, "predicate faulted during check");
                Err(internal_failure(&fault))
            }
        }
    }

    /// Kind gate followed by the validator chain. The outer `Err` is a fault.
    fn run(
        &self,
        value: &Value,
        ctx: &FieldContext<'_>,
    ) -> Result<ValidationResult, PredicateFault> {
        if !self.config.kind_predicate().evaluate(value)? {
            tracing::trace!(field = ctx.field_name(), "kind gate failed");
            return Ok(Err(invalid_type(
                value,
                ctx,
                self.config.expected_kind_label(),
            )));
        }

        for (index, validator) in self.config.validators().iter().enumerate() {
            if !validator.predicate().evaluate(value)? {
                tracing::trace!(field = ctx.field_name(), index, "validator failed");
                return Ok(Err(invalid_value(value, ctx, index, validator)));
            }
        }

        Ok(Ok(()))
    }
}

impl CheckField for Checker {
    fn check(&self, record: &Record, ctx: &FieldContext<'_>) -> ValidationResult {
        Self::check(self, record, ctx)
    }
}

// ============================================================================
// MESSAGES
// ============================================================================

fn missing_required(ctx: &FieldContext<'_>) -> ValidationError {
    let message = format!(
        "Required {} `{}` was not specified in `{}`.",
        ctx.location(),
        ctx.display_field_name(),
        ctx.entity_name(),
    );
    ValidationError::new(ErrorKind::Required, message)
        .with_field(ctx.field_name().to_owned())
        .with_param("location", ctx.location().display_name())
        .with_param("entity", ctx.entity_name().to_owned())
}

/// ": `<field>` of type `<kind>` supplied to `<entity>`"
fn supplied(value: &Value, ctx: &FieldContext<'_>) -> String {
    format!(
        ": `{}` of type `{}` supplied to `{}`",
        ctx.field_name(),
        kind_of(value),
        ctx.entity_name(),
    )
}

fn invalid_type(value: &Value, ctx: &FieldContext<'_>, expected: &str) -> ValidationError {
    let message = format!(
        "Invalid input type{}, expected `{expected}`.",
        supplied(value, ctx)
    );
    ValidationError::new(ErrorKind::InvalidType, message)
        .with_field(ctx.field_name().to_owned())
        .with_param("expected", expected.to_owned())
        .with_param("actual", kind_of(value))
        .with_param("entity", ctx.entity_name().to_owned())
}

fn invalid_value(
    value: &Value,
    ctx: &FieldContext<'_>,
    index: usize,
    validator: &ValueValidator,
) -> ValidationError {
    let base = format!("Invalid {}{}", ctx.location(), supplied(value, ctx));
    let message = match (validator.failure_message(), validator.predicate().name()) {
        (Some(failure_message), _) => format!("{base}: {failure_message}"),
        (None, Some(name)) => {
            format!("{base}, expected to be successfully validated with `{name}`.")
        }
        (None, None) => format!(
            "{base}, expected to be successfully validated with supplied validator [{index}]."
        ),
    };

    let mut error = ValidationError::new(ErrorKind::InvalidValue, message)
        .with_field(ctx.field_name().to_owned())
        .with_param("entity", ctx.entity_name().to_owned())
        .with_param("index", index.to_string());
    if let (None, Some(name)) = (validator.failure_message(), validator.predicate().name()) {
        error = error.with_param("validator", name.to_owned());
    }
    error
}

fn internal_failure(fault: &PredicateFault) -> ValidationError {
    ValidationError::new(ErrorKind::Internal, format!("Validator fault: {fault}"))
        .with_param("fault", fault.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{ValidatorEntry, ValidatorOptions, Validators};
    use crate::foundation::Location;
    use crate::kind::PrimitiveKind;
    use crate::predicate::Predicate;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap_or_default()
    }

    fn object_checker(validators: impl Into<Validators>) -> Checker {
        Checker::of_kind(PrimitiveKind::Object, validators).unwrap()
    }

    fn never_called() -> Predicate {
        Predicate::named("should_never_reach", |_| {
            panic!("validator must not run after an earlier failure")
        })
    }

    #[test]
    fn test_valid_value_passes() {
        let checker = object_checker(Predicate::named("is_valid", |_| true));
        let ctx = FieldContext::new("test_prop").entity("TestClass");
        assert_eq!(checker.check(&record(json!({ "test_prop": {} })), &ctx), Ok(()));
        assert_eq!(
            checker.required().check(&record(json!({ "test_prop": {} })), &ctx),
            Ok(())
        );
    }

    #[test]
    fn test_required_missing_message() {
        let checker = object_checker(Predicate::named("is_valid", |_| true)).required();
        let ctx = FieldContext::new("user").entity("Profile");
        let error = checker.check(&Record::new(), &ctx).unwrap_err();

        assert_eq!(error.kind, ErrorKind::Required);
        assert_eq!(
            error.message,
            "Required prop `user` was not specified in `Profile`."
        );
    }

    #[test]
    fn test_required_uses_display_name_and_anonymous() {
        let checker = object_checker(Predicate::named("is_valid", |_| true)).required();
        let ctx = FieldContext::new("id")
            .display_name("items[0].id")
            .at(Location::ChildContext);
        let error = checker.check(&Record::new(), &ctx).unwrap_err();
        assert_eq!(
            error.message,
            "Required child context `items[0].id` was not specified in `<<anonymous>>`."
        );
    }

    #[test]
    fn test_required_null_is_present_but_passes() {
        let checker = object_checker(never_called()).required();
        let ctx = FieldContext::new("user");
        assert_eq!(checker.check(&record(json!({ "user": null })), &ctx), Ok(()));
    }

    #[test]
    fn test_optional_absent_passes() {
        let checker = object_checker(never_called());
        let ctx = FieldContext::new("user");
        assert_eq!(checker.check(&Record::new(), &ctx), Ok(()));
    }

    #[test]
    fn test_kind_gate_skips_validators() {
        let checker = object_checker(never_called());
        let ctx = FieldContext::new("user").entity("Profile");
        let error = checker
            .check(&record(json!({ "user": "text" })), &ctx)
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidType);
        assert_eq!(
            error.message,
            "Invalid input type: `user` of type `string` supplied to `Profile`, expected `object`."
        );
        assert_eq!(error.param("actual"), Some("string"));
    }

    #[test]
    fn test_named_validator_message() {
        let checker = object_checker(Predicate::named("is_valid", |v| v["foo"] == 456));
        let ctx = FieldContext::new("test_complex_prop").entity("TestClass");
        let error = checker
            .check(&record(json!({ "test_complex_prop": { "foo": 123 } })), &ctx)
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidValue);
        assert_eq!(
            error.message,
            "Invalid prop: `test_complex_prop` of type `object` supplied to `TestClass`, \
             expected to be successfully validated with `is_valid`."
        );
        assert_eq!(error.param("validator"), Some("is_valid"));
    }

    #[test]
    fn test_anonymous_validator_message_uses_index() {
        let validators = Validators::default()
            .then(Predicate::new(|_| true))
            .then(Predicate::new(|_| false));
        let checker = object_checker(validators);
        let ctx = FieldContext::new("p").entity("C").at(Location::Context);
        let error = checker.check(&record(json!({ "p": {} })), &ctx).unwrap_err();

        assert_eq!(
            error.message,
            "Invalid context: `p` of type `object` supplied to `C`, \
             expected to be successfully validated with supplied validator [1]."
        );
        assert_eq!(error.param("validator"), None);
    }

    #[test]
    fn test_custom_failure_message_verbatim() {
        let checker = object_checker(
            ValidatorOptions::new(Predicate::named("is_valid", |_| false))
                .failure_message("test-failure-message"),
        );
        let ctx = FieldContext::new("p").entity("C");
        let error = checker.check(&record(json!({ "p": {} })), &ctx).unwrap_err();

        assert_eq!(
            error.message,
            "Invalid prop: `p` of type `object` supplied to `C`: test-failure-message"
        );
        assert!(!error.message.contains("is_valid"));
    }

    #[test]
    fn test_short_circuit_on_first_failure() {
        let validators = Validators::from(vec![
            ValidatorEntry::from(Predicate::named("should_fail", |_| false)),
            ValidatorOptions::new(never_called()).into(),
        ]);
        let checker = object_checker(validators);
        let error = checker
            .check(&record(json!({ "p": {} })), &FieldContext::new("p"))
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidValue);
        assert!(error.message.contains("`should_fail`"));
        assert!(!error.message.contains("should_never_reach"));
    }

    #[test]
    fn test_each_validator_runs_once_when_all_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = |calls: &Arc<AtomicUsize>| {
            let calls = Arc::clone(calls);
            Predicate::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };
        let checker = object_checker(vec![counted(&calls), counted(&calls), counted(&calls)]);
        assert_eq!(
            checker.check(&record(json!({ "p": {} })), &FieldContext::new("p")),
            Ok(())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_panicking_validator_is_internal_failure() {
        let checker = object_checker(Predicate::named("validator_throws", |_| {
            panic!("lkj-12lk3j-sdfkj")
        }));
        let ctx = FieldContext::new("test_complex_prop").entity("TestClass");
        let error = checker
            .check(&record(json!({ "test_complex_prop": {} })), &ctx)
            .unwrap_err();

        assert!(error.is_internal());
        assert!(error.message.contains("lkj-12lk3j-sdfkj"));
        assert!(!error.message.contains("Invalid prop"));
        assert!(!error.message.contains("`test_complex_prop`"));
        assert!(!error.message.contains("`validator_throws`"));
        assert_eq!(error.field, None);
    }

    #[test]
    fn test_failing_kind_predicate_is_internal_failure() {
        let kind = Predicate::fallible(|_| Err::<bool, _>("kind lookup failed"));
        let checker = Checker::new("object", kind, never_called()).unwrap();
        let error = checker
            .check(&record(json!({ "p": 1 })), &FieldContext::new("p"))
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Internal);
        assert_eq!(error.message, "Validator fault: kind lookup failed");
    }

    #[test]
    fn test_required_and_optional_share_config() {
        let checker = object_checker(Predicate::named("is_valid", |_| true));
        let required = checker.required();
        assert!(required.is_required());
        assert!(!required.optional().is_required());
        assert!(Arc::ptr_eq(&checker.config, &required.config));
    }
}

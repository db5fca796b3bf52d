//! Property-based tests for checkers.

use proptype::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,12}".prop_map(Value::from),
        prop::collection::vec(any::<i32>(), 0..4).prop_map(|v| json!(v)),
        ".{0,6}".prop_map(|key| {
            let mut object = Record::new();
            object.insert(key, json!(1));
            Value::Object(object)
        }),
    ]
}

fn panics(_: &Value) -> bool {
    panic!("must not be evaluated")
}

fn is_short(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.len() < 6)
}

// ============================================================================
// ABSENCE: optional fields that are missing or null always pass
// ============================================================================

proptest! {
    #[test]
    fn optional_absent_always_passes(field in "[a-z]{1,8}", other in any_value()) {
        let checker = Checker::of_kind(PrimitiveKind::String, predicate!(panics)).unwrap();
        let mut props = Record::new();
        props.insert(format!("{field}_other"), other);

        prop_assert_eq!(checker.check(&props, &FieldContext::new(&field)), Ok(()));

        props.insert(field.clone(), Value::Null);
        prop_assert_eq!(checker.check(&props, &FieldContext::new(&field)), Ok(()));
    }
}

// ============================================================================
// KIND GATE: a wrong kind names the label and the observed kind
// ============================================================================

proptest! {
    #[test]
    fn kind_gate_names_expected_and_observed(value in any_value()) {
        prop_assume!(!value.is_null() && !value.is_string());

        let checker = Checker::of_kind(PrimitiveKind::String, predicate!(panics)).unwrap();
        let mut props = Record::new();
        props.insert("v".into(), value.clone());

        let error = checker.check(&props, &FieldContext::new("v")).unwrap_err();
        prop_assert_eq!(error.kind, ErrorKind::InvalidType);
        prop_assert!(error.message.contains("expected `string`"));
        let observed = format!("of type `{}`", proptype::foundation::kind_of(&value));
        prop_assert!(error.message.contains(&observed));
    }
}

// ============================================================================
// ROUND TRIP: positional and bundled construction behave identically
// ============================================================================

proptest! {
    #[test]
    fn positional_and_bundle_agree(value in any_value(), required in any::<bool>(), present in any::<bool>()) {
        let positional = Checker::new(
            "string",
            PrimitiveKind::String.predicate(),
            predicate!(is_short),
        )
        .unwrap();
        let bundled = Checker::from_options(
            CheckerOptions::new()
                .expected_primitive_type("string")
                .primitive_type_validator(PrimitiveKind::String.predicate())
                .value_validator(predicate!(is_short)),
        )
        .unwrap();
        let (positional, bundled) = if required {
            (positional.required(), bundled.required())
        } else {
            (positional, bundled)
        };

        let mut props = Record::new();
        if present {
            props.insert("v".into(), value);
        }
        let ctx = FieldContext::new("v").entity("Entity");
        prop_assert_eq!(positional.check(&props, &ctx), bundled.check(&props, &ctx));
    }
}

// ============================================================================
// IDEMPOTENCY: check(x) == check(x)
// ============================================================================

proptest! {
    #[test]
    fn check_is_deterministic(value in any_value()) {
        let checker = Checker::of_kind(PrimitiveKind::String, predicate!(is_short)).unwrap().required();
        let mut props = Record::new();
        props.insert("v".into(), value);
        let ctx = FieldContext::new("v");
        prop_assert_eq!(checker.check(&props, &ctx), checker.check(&props, &ctx));
    }
}

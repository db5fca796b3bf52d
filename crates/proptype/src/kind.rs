//! Built-in primitive kinds: a label and the predicate that recognizes it.

use crate::predicate::Predicate;
use serde_json::Value;
use std::fmt;

/// Primitive kinds with a ready-made kind gate.
///
/// # Examples
///
/// ```rust
/// use proptype::PrimitiveKind;
/// use serde_json::json;
///
/// assert!(PrimitiveKind::String.matches(&json!("hi")));
/// assert!(!PrimitiveKind::Object.matches(&json!([1, 2])));
/// assert_eq!(PrimitiveKind::Boolean.label(), "boolean");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    /// Accepts every non-null value.
    Any,
}

impl PrimitiveKind {
    /// Label shown in "expected `<label>`" messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Any => "any",
        }
    }

    /// Whether `value` is of this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Any => !value.is_null(),
        }
    }

    /// The kind gate as a named [`Predicate`], e.g. `is_string`.
    #[must_use]
    pub fn predicate(self) -> Predicate {
        let name = match self {
            Self::String => "is_string",
            Self::Number => "is_number",
            Self::Boolean => "is_boolean",
            Self::Object => "is_object",
            Self::Array => "is_array",
            Self::Any => "is_any",
        };
        Predicate::named(name, move |value| self.matches(value))
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(PrimitiveKind::String, json!("x"), true)]
    #[case(PrimitiveKind::String, json!(1), false)]
    #[case(PrimitiveKind::Number, json!(0), true)]
    #[case(PrimitiveKind::Number, json!("0"), false)]
    #[case(PrimitiveKind::Boolean, json!(false), true)]
    #[case(PrimitiveKind::Object, json!({}), true)]
    #[case(PrimitiveKind::Object, json!([]), false)]
    #[case(PrimitiveKind::Array, json!([]), true)]
    #[case(PrimitiveKind::Any, json!(""), true)]
    #[case(PrimitiveKind::Any, json!(null), false)]
    fn test_matches(#[case] kind: PrimitiveKind, #[case] value: Value, #[case] expected: bool) {
        assert_eq!(kind.matches(&value), expected);
        assert_eq!(kind.predicate().evaluate(&value), Ok(expected));
    }

    #[test]
    fn test_predicate_is_named() {
        assert_eq!(PrimitiveKind::Array.predicate().name(), Some("is_array"));
    }

    #[test]
    fn test_serde_labels() {
        let kind: PrimitiveKind = serde_json::from_str("\"boolean\"").unwrap();
        assert_eq!(kind, PrimitiveKind::Boolean);
        assert_eq!(kind.to_string(), "boolean");
    }
}

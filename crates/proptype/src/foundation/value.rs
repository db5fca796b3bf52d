//! Value helpers shared by the pipeline and the built-in kinds.

use serde_json::Value;

/// A record of named values, e.g. a component's property bag.
pub type Record = serde_json::Map<String, Value>;

/// Observed kind of a value, as shown in "invalid input type" messages.
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `true` for values that count as "not supplied": a missing key or `null`.
#[must_use]
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

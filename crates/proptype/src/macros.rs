//! Macros for building predicates with minimal boilerplate.

/// Builds a [`Predicate`](crate::Predicate).
///
/// A bare function name becomes a predicate displayed under that name, so
/// failures read "expected to be successfully validated with `is_valid`".
/// Any other expression is wrapped anonymously; an explicit name can be
/// given as a leading string literal.
///
/// # Examples
///
/// ```rust
/// use proptype::predicate;
/// use serde_json::{Value, json};
///
/// fn is_valid(value: &Value) -> bool {
///     value["foo"] == 456
/// }
///
/// let named = predicate!(is_valid);
/// assert_eq!(named.name(), Some("is_valid"));
///
/// let labelled = predicate!("has_foo", |v: &Value| v.get("foo").is_some());
/// assert_eq!(labelled.name(), Some("has_foo"));
///
/// let anonymous = predicate!(|v: &Value| v.is_object());
/// assert_eq!(anonymous.name(), None);
/// assert_eq!(anonymous.evaluate(&json!({})), Ok(true));
/// ```
#[macro_export]
macro_rules! predicate {
    ($func:ident) => {
        $crate::Predicate::named(stringify!($func), $func)
    };
    ($name:literal, $func:expr $(,)?) => {
        $crate::Predicate::named($name, $func)
    };
    ($func:expr $(,)?) => {
        $crate::Predicate::new($func)
    };
}

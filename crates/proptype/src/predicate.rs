//! Predicates: shared callables over a single value.
//!
//! A [`Predicate`] wraps either an infallible `Fn(&Value) -> bool` or a
//! fallible `Fn(&Value) -> Result<bool, E>`. Callers never invoke the
//! closure directly; [`Predicate::evaluate`] runs it and turns both error
//! returns and panics into a [`PredicateFault`], so a broken predicate is
//! reported instead of unwinding through the caller.
//!
//! # Examples
//!
//! ```rust
//! use proptype::Predicate;
//! use serde_json::json;
//!
//! let is_even = Predicate::named("is_even", |v| v.as_i64().is_some_and(|n| n % 2 == 0));
//! assert_eq!(is_even.name(), Some("is_even"));
//! assert_eq!(is_even.evaluate(&json!(4)), Ok(true));
//! ```

use serde_json::Value;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Signature every predicate is stored as.
pub type PredicateFn = dyn Fn(&Value) -> Result<bool, PredicateFault> + Send + Sync;

// ============================================================================
// FAULT
// ============================================================================

/// A predicate could not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredicateFault {
    /// The predicate returned an error.
    #[error("{0}")]
    Failed(String),

    /// The predicate panicked.
    #[error("panicked: {0}")]
    Panicked(String),
}

impl PredicateFault {
    /// Creates a fault from any displayable error.
    pub fn failed(error: impl fmt::Display) -> Self {
        Self::Failed(error.to_string())
    }

    fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let description = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_owned()
        };
        Self::Panicked(description)
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

/// A cheaply clonable predicate with an optional display name.
#[derive(Clone)]
pub struct Predicate {
    name: Option<Cow<'static, str>>,
    func: Arc<PredicateFn>,
}

impl Predicate {
    /// Wraps an anonymous infallible predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(move |value| Ok(f(value))),
        }
    }

    /// Wraps an infallible predicate under a display name.
    pub fn named<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(f).with_name(name)
    }

    /// Wraps an anonymous predicate that may fail.
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            name: None,
            func: Arc::new(move |value| f(value).map_err(PredicateFault::failed)),
        }
    }

    /// Wraps a predicate that may fail under a display name.
    pub fn named_fallible<F, E>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self::fallible(f).with_name(name)
    }

    /// Sets the display name. An empty name leaves the predicate anonymous.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Display name, if the predicate has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Runs the predicate, converting error returns and panics into a fault.
    pub fn evaluate(&self, value: &Value) -> Result<bool, PredicateFault> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.func)(value))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(PredicateFault::from_panic(payload.as_ref())),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .field("func", &"<function>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anonymous_has_no_name() {
        let p = Predicate::new(|_| true);
        assert_eq!(p.name(), None);
        assert_eq!(p.evaluate(&json!(1)), Ok(true));
    }

    #[test]
    fn test_empty_name_is_anonymous() {
        let p = Predicate::named("", |_| true);
        assert_eq!(p.name(), None);
    }

    #[test]
    fn test_fallible_error_becomes_fault() {
        let p = Predicate::fallible(|v: &Value| {
            v.as_str()
                .map(|s| s.len() > 2)
                .ok_or("expected a string")
        });
        assert_eq!(p.evaluate(&json!("abc")), Ok(true));
        assert_eq!(
            p.evaluate(&json!(1)),
            Err(PredicateFault::Failed("expected a string".into()))
        );
    }

    #[test]
    fn test_panic_becomes_fault() {
        let p = Predicate::named("explodes", |_| panic!("lkj-12lk3j-sdfkj"));
        let fault = p.evaluate(&json!({})).unwrap_err();
        assert_eq!(fault, PredicateFault::Panicked("lkj-12lk3j-sdfkj".into()));
        assert!(fault.to_string().contains("lkj-12lk3j-sdfkj"));
    }

    #[test]
    fn test_formatted_panic_payload() {
        let p = Predicate::new(|v| panic!("bad value {v}"));
        let fault = p.evaluate(&json!(7)).unwrap_err();
        assert_eq!(fault, PredicateFault::Panicked("bad value 7".into()));
    }

    #[test]
    fn test_debug_hides_closure() {
        let p = Predicate::named("is_ok", |_| true);
        let debug = format!("{p:?}");
        assert!(debug.contains("is_ok"));
        assert!(debug.contains("<function>"));
    }
}

//! Error types for check failures
//!
//! A check either succeeds or produces exactly one [`ValidationError`]. The
//! error carries an [`ErrorKind`] so callers can tell "the data is invalid"
//! apart from "a validator is broken" without parsing messages.
//!
//! Construction-time failures are a separate type,
//! [`ConstructionError`](crate::factory::ConstructionError).

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Which check produced a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field was not present in the record.
    Required,
    /// The value failed the kind gate.
    InvalidType,
    /// The value failed one of the secondary validators.
    InvalidValue,
    /// A predicate faulted while being evaluated.
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::InvalidValue => "invalid_value",
            Self::Internal => "internal_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Ordered key-value parameters attached to an error (typically 0-4 entries).
pub type ErrorParams = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 4]>;

/// A single check failure.
///
/// `message` is the human-readable text surfaced to developers. `params`
/// carries the pieces the message was built from, for programmatic use.
///
/// # Examples
///
/// ```rust
/// use proptype::foundation::{ErrorKind, ValidationError};
///
/// let error = ValidationError::new(ErrorKind::InvalidType, "wrong kind")
///     .with_field("title")
///     .with_param("expected", "string");
///
/// assert_eq!(error.code(), "invalid_type");
/// assert_eq!(error.param("expected"), Some("string"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What kind of check failed.
    pub kind: ErrorKind,

    /// Human-readable message in English.
    pub message: Cow<'static, str>,

    /// Field the error refers to. Always `None` for internal failures.
    pub field: Option<Cow<'static, str>>,

    /// Parameters the message was built from.
    pub params: ErrorParams,
}

impl ValidationError {
    /// Creates a new error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            params: SmallVec::new(),
        }
    }

    /// Sets the field this error refers to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns `true` if a predicate faulted rather than the data being invalid.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.kind == ErrorKind::Internal
    }

    /// Converts the error to a JSON structure.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code(),
            "message": self.message,
            "field": self.field,
            "params": params,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// TESTS
// ============================================================================

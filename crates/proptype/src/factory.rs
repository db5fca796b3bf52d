//! Checker construction: argument normalization and config validation.
//!
//! Checkers can be built from positional arguments or from one
//! [`CheckerOptions`] bundle. Both forms are resolved into a [`CheckerArgs`]
//! value and normalized by the same code, so a checker built either way
//! behaves identically.
//!
//! All problems are reported here, synchronously, as a
//! [`ConstructionError`]. Nothing malformed survives until check time.
//!
//! # Examples
//!
//! ```rust
//! use proptype::{Checker, CheckerOptions, Predicate, PrimitiveKind, ValidatorOptions, Validators};
//!
//! // Positional
//! let positional = Checker::new(
//!     "object",
//!     PrimitiveKind::Object.predicate(),
//!     Predicate::named("has_id", |v| v.get("id").is_some()),
//! )?;
//!
//! // Bundled, with a custom message on the second validator
//! let bundled = Checker::from_options(
//!     CheckerOptions::new()
//!         .expected_primitive_type("object")
//!         .primitive_type_validator(PrimitiveKind::Object.predicate())
//!         .value_validator(Validators::from_iter([
//!             Predicate::named("has_id", |v| v.get("id").is_some()).into(),
//!             ValidatorOptions::new(Predicate::new(|v| v.get("id").is_some_and(|id| id.is_u64())))
//!                 .failure_message("`id` must be an unsigned integer")
//!                 .into(),
//!         ])),
//! )?;
//!
//! assert_eq!(positional.config().validators().len(), 1);
//! assert_eq!(bundled.config().validators().len(), 2);
//! # Ok::<(), proptype::ConstructionError>(())
//! ```

use crate::checker::Checker;
use crate::kind::PrimitiveKind;
use crate::predicate::Predicate;

// ============================================================================
// CONSTRUCTION ERROR
// ============================================================================

/// A checker could not be built from the supplied arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConstructionError {
    /// The expected primitive type label is missing or blank.
    #[error("expected primitive type must be a non-empty label")]
    InvalidExpectedKind,

    /// No primitive type validator was supplied.
    #[error("primitive type validator is required")]
    MissingKindPredicate,

    /// A validator entry carries a blank failure message.
    #[error("value validator [{index}]: failure message must be a non-empty string")]
    InvalidFailureMessage { index: usize },

    /// A validator entry has no validation predicate.
    #[error("value validator [{index}]: validation predicate is required")]
    MissingValidationPredicate { index: usize },

    /// No value validators were supplied.
    #[error("at least one value validator is required")]
    EmptyValidatorChain,
}

// ============================================================================
// VALIDATOR INPUT
// ============================================================================

/// A validator entry given as a record: predicate plus optional message.
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    pub validation_predicate: Option<Predicate>,
    pub failure_message: Option<String>,
}

impl ValidatorOptions {
    /// Entry with a predicate and no custom message.
    #[must_use]
    pub fn new(predicate: Predicate) -> Self {
        Self {
            validation_predicate: Some(predicate),
            failure_message: None,
        }
    }

    /// Sets the message reported verbatim when the predicate fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = Some(message.into());
        self
    }
}

/// One raw entry of a validator list, before normalization.
#[derive(Debug, Clone)]
pub enum ValidatorEntry {
    Predicate(Predicate),
    Options(ValidatorOptions),
}

impl From<Predicate> for ValidatorEntry {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<ValidatorOptions> for ValidatorEntry {
    fn from(options: ValidatorOptions) -> Self {
        Self::Options(options)
    }
}

/// The `value_validator` argument: one entry or an ordered list of entries.
///
/// Order is significant: it is the evaluation and short-circuit order.
#[derive(Debug, Clone, Default)]
pub struct Validators(Vec<ValidatorEntry>);

impl Validators {
    /// Number of raw entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn then(mut self, entry: impl Into<ValidatorEntry>) -> Self {
        self.0.push(entry.into());
        self
    }
}

impl From<Predicate> for Validators {
    fn from(predicate: Predicate) -> Self {
        Self(vec![predicate.into()])
    }
}

impl From<ValidatorOptions> for Validators {
    fn from(options: ValidatorOptions) -> Self {
        Self(vec![options.into()])
    }
}

impl From<ValidatorEntry> for Validators {
    fn from(entry: ValidatorEntry) -> Self {
        Self(vec![entry])
    }
}

impl From<Vec<ValidatorEntry>> for Validators {
    fn from(entries: Vec<ValidatorEntry>) -> Self {
        Self(entries)
    }
}

impl From<Vec<Predicate>> for Validators {
    fn from(predicates: Vec<Predicate>) -> Self {
        predicates.into_iter().map(ValidatorEntry::from).collect()
    }
}

impl<const N: usize> From<[ValidatorEntry; N]> for Validators {
    fn from(entries: [ValidatorEntry; N]) -> Self {
        Self(entries.into())
    }
}

impl FromIterator<ValidatorEntry> for Validators {
    fn from_iter<I: IntoIterator<Item = ValidatorEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// NORMALIZED VALIDATOR
// ============================================================================

/// One normalized secondary validator.
#[derive(Debug, Clone)]
pub enum ValueValidator {
    /// A bare predicate; failures are described by its name or chain index.
    Predicate(Predicate),
    /// A predicate whose failures are described by a custom message.
    WithMessage {
        predicate: Predicate,
        failure_message: String,
    },
}

impl ValueValidator {
    /// The predicate to evaluate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        match self {
            Self::Predicate(predicate) | Self::WithMessage { predicate, .. } => predicate,
        }
    }

    /// The custom failure message, if any.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Predicate(_) => None,
            Self::WithMessage {
                failure_message, ..
            } => Some(failure_message),
        }
    }

    fn normalize(index: usize, entry: ValidatorEntry) -> Result<Self, ConstructionError> {
        match entry {
            ValidatorEntry::Predicate(predicate) => Ok(Self::Predicate(predicate)),
            ValidatorEntry::Options(ValidatorOptions {
                validation_predicate,
                failure_message,
            }) => {
                if failure_message
                    .as_deref()
                    .is_some_and(|message| message.trim().is_empty())
                {
                    return Err(ConstructionError::InvalidFailureMessage { index });
                }
                let predicate = validation_predicate
                    .ok_or(ConstructionError::MissingValidationPredicate { index })?;
                Ok(match failure_message {
                    Some(failure_message) => Self::WithMessage {
                        predicate,
                        failure_message,
                    },
                    None => Self::Predicate(predicate),
                })
            }
        }
    }
}

// ============================================================================
// CHECKER CONFIG
// ============================================================================

/// Immutable configuration shared by both forms of a [`Checker`].
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    expected_kind_label: String,
    kind_predicate: Predicate,
    validators: Vec<ValueValidator>,
}

impl CheckerConfig {
    /// Display name of the expected primitive kind.
    #[must_use]
    pub fn expected_kind_label(&self) -> &str {
        &self.expected_kind_label
    }

    /// The kind gate.
    #[must_use]
    pub fn kind_predicate(&self) -> &Predicate {
        &self.kind_predicate
    }

    /// The validator chain, in evaluation order. Never empty.
    #[must_use]
    pub fn validators(&self) -> &[ValueValidator] {
        &self.validators
    }
}

// ============================================================================
// CONSTRUCTION ARGUMENTS
// ============================================================================

/// Construction arguments given as one bundle.
///
/// Every field is optional so that incomplete bundles are reported as
/// [`ConstructionError`]s rather than rejected by the type system.
#[derive(Debug, Clone, Default)]
pub struct CheckerOptions {
    pub expected_primitive_type: Option<String>,
    pub primitive_type_validator: Option<Predicate>,
    pub value_validator: Option<Validators>,
}

impl CheckerOptions {
    /// An empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A bundle with the label and kind gate of a built-in kind.
    #[must_use]
    pub fn for_kind(kind: PrimitiveKind) -> Self {
        Self::new()
            .expected_primitive_type(kind.label())
            .primitive_type_validator(kind.predicate())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn expected_primitive_type(mut self, label: impl Into<String>) -> Self {
        self.expected_primitive_type = Some(label.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn primitive_type_validator(mut self, predicate: Predicate) -> Self {
        self.primitive_type_validator = Some(predicate);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn value_validator(mut self, validators: impl Into<Validators>) -> Self {
        self.value_validator = Some(validators.into());
        self
    }
}

/// Construction arguments in either accepted shape.
#[derive(Debug, Clone)]
pub enum CheckerArgs {
    /// `(expected kind label, kind predicate, value validator)`.
    Positional {
        expected_kind_label: String,
        kind_predicate: Predicate,
        value_validator: Validators,
    },
    /// A single options bundle.
    Bundle(CheckerOptions),
}

impl From<CheckerOptions> for CheckerArgs {
    fn from(options: CheckerOptions) -> Self {
        Self::Bundle(options)
    }
}

impl CheckerArgs {
    /// Normalizes and validates the arguments into a config.
    pub fn build(self) -> Result<CheckerConfig, ConstructionError> {
        let options = match self {
            Self::Positional {
                expected_kind_label,
                kind_predicate,
                value_validator,
            } => CheckerOptions {
                expected_primitive_type: Some(expected_kind_label),
                primitive_type_validator: Some(kind_predicate),
                value_validator: Some(value_validator),
            },
            Self::Bundle(options) => options,
        };

        let expected_kind_label = options
            .expected_primitive_type
            .filter(|label| !label.trim().is_empty())
            .ok_or(ConstructionError::InvalidExpectedKind)?;
        let kind_predicate = options
            .primitive_type_validator
            .ok_or(ConstructionError::MissingKindPredicate)?;
        let validators = options
            .value_validator
            .unwrap_or_default()
            .0
            .into_iter()
            .enumerate()
            .map(|(index, entry)| ValueValidator::normalize(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        if validators.is_empty() {
            return Err(ConstructionError::EmptyValidatorChain);
        }

        tracing::debug!(
            expected = %expected_kind_label,
            validators = validators.len(),
            "built checker config"
        );

        Ok(CheckerConfig {
            expected_kind_label,
            kind_predicate,
            validators,
        })
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

impl Checker {
    /// Builds an optional checker from positional arguments.
    pub fn new(
        expected_kind_label: impl Into<String>,
        kind_predicate: Predicate,
        value_validator: impl Into<Validators>,
    ) -> Result<Self, ConstructionError> {
        Self::from_args(CheckerArgs::Positional {
            expected_kind_label: expected_kind_label.into(),
            kind_predicate,
            value_validator: value_validator.into(),
        })
    }

    /// Builds an optional checker from an options bundle.
    pub fn from_options(options: CheckerOptions) -> Result<Self, ConstructionError> {
        Self::from_args(CheckerArgs::Bundle(options))
    }

    /// Builds an optional checker for a built-in kind.
    pub fn of_kind(
        kind: PrimitiveKind,
        value_validator: impl Into<Validators>,
    ) -> Result<Self, ConstructionError> {
        Self::from_options(CheckerOptions::for_kind(kind).value_validator(value_validator))
    }

    /// Builds an optional checker from arguments in either shape.
    pub fn from_args(args: impl Into<CheckerArgs>) -> Result<Self, ConstructionError> {
        args.into().build().map(Self::from_config)
    }
}

/// Builds an optional checker from positional arguments.
///
/// Shorthand for [`Checker::new`].
pub fn checker(
    expected_kind_label: impl Into<String>,
    kind_predicate: Predicate,
    value_validator: impl Into<Validators>,
) -> Result<Checker, ConstructionError> {
    Checker::new(expected_kind_label, kind_predicate, value_validator)
}

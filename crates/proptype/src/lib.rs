//! # proptype
//!
//! Composable runtime checkers for named values inside property records.
//!
//! A checker is built once per declared field from an expected primitive
//! kind, a predicate recognizing that kind, and one or more secondary
//! validators. It is then run against every record instance and reports
//! either nothing or a single descriptive [`ValidationError`](foundation::ValidationError).
//!
//! ## Quick Start
//!
//! ```rust
//! use proptype::prelude::*;
//! use serde_json::{Value, json};
//!
//! fn has_id(value: &Value) -> bool {
//!     value.get("id").is_some()
//! }
//!
//! let user = Checker::of_kind(PrimitiveKind::Object, predicate!(has_id))?.required();
//!
//! let record = json!({ "user": { "name": "ada" } }).as_object().cloned().unwrap_or_default();
//! let error = user.check(&record, &FieldContext::new("user").entity("Profile")).unwrap_err();
//!
//! assert_eq!(
//!     error.message,
//!     "Invalid prop: `user` of type `object` supplied to `Profile`, \
//!      expected to be successfully validated with `has_id`."
//! );
//! # Ok::<(), proptype::ConstructionError>(())
//! ```
//!
//! ## Failure classes
//!
//! - [`ConstructionError`]: malformed construction arguments, returned by
//!   the factory.
//! - [`ErrorKind::Required`](foundation::ErrorKind::Required),
//!   [`InvalidType`](foundation::ErrorKind::InvalidType),
//!   [`InvalidValue`](foundation::ErrorKind::InvalidValue): the data is invalid.
//! - [`ErrorKind::Internal`](foundation::ErrorKind::Internal): a predicate
//!   faulted while checking.

pub mod checker;
pub mod factory;
pub mod foundation;
pub mod host;
pub mod kind;
mod macros;
pub mod predicate;
pub mod prelude;

pub use checker::Checker;
pub use factory::{
    CheckerArgs, CheckerConfig, CheckerOptions, ConstructionError, ValidatorEntry,
    ValidatorOptions, Validators, ValueValidator, checker,
};
pub use kind::PrimitiveKind;
pub use predicate::{Predicate, PredicateFault};

//! Core types shared by the factory, the pipeline and the host glue.
//!
//! - **Traits**: [`CheckField`]
//! - **Errors**: [`ValidationError`], [`ErrorKind`]
//! - **Context**: [`FieldContext`], [`Location`]
//! - **Values**: [`Record`], [`kind_of`]

pub mod context;
pub mod error;
pub mod traits;
pub mod value;

pub use context::{ANONYMOUS, FieldContext, Location, UnknownLocation};
pub use error::{ErrorKind, ErrorParams, ValidationError};
pub use traits::CheckField;
pub use value::{Record, is_absent, kind_of};

/// A check result.
pub type ValidationResult = Result<(), ValidationError>;

//! Prelude module for convenient imports.
//!
//! ```rust
//! use proptype::prelude::*;
//! ```

pub use crate::foundation::{
    CheckField, ErrorKind, FieldContext, Location, Record, ValidationError, ValidationResult,
};

pub use crate::{
    Checker, CheckerOptions, ConstructionError, Predicate, PredicateFault, PrimitiveKind,
    ValidatorOptions, Validators, checker, predicate,
};

pub use crate::host::{PropTypes, Reporter, ReporterConfig};

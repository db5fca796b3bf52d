//! The trait every field checker implements.

use crate::foundation::{FieldContext, Record, ValidationError};

/// Checks one named value inside a record.
///
/// [`Checker`](crate::Checker) is the main implementation; plain closures
/// with the same signature implement it too, so hand-written checks can sit
/// next to generated ones in a [`PropTypes`](crate::host::PropTypes) table.
///
/// # Examples
///
/// ```rust
/// use proptype::foundation::{CheckField, ErrorKind, FieldContext, Record, ValidationError};
///
/// fn non_empty(record: &Record, _ctx: &FieldContext<'_>) -> Result<(), ValidationError> {
///     if record.is_empty() {
///         Err(ValidationError::new(ErrorKind::InvalidValue, "empty record"))
///     } else {
///         Ok(())
///     }
/// }
///
/// assert!(non_empty.check(&Record::new(), &FieldContext::new("a")).is_err());
/// ```
pub trait CheckField {
    /// Checks `ctx.field_name()` in `record`.
    ///
    /// Returns `Ok(())` when the value is acceptable, or the single error
    /// describing the first failing check.
    fn check(&self, record: &Record, ctx: &FieldContext<'_>) -> Result<(), ValidationError>;
}

impl<F> CheckField for F
where
    F: Fn(&Record, &FieldContext<'_>) -> Result<(), ValidationError>,
{
    fn check(&self, record: &Record, ctx: &FieldContext<'_>) -> Result<(), ValidationError> {
        self(record, ctx)
    }
}

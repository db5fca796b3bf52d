//! Host glue: field tables and developer-facing warnings.
//!
//! A [`PropTypes`] table maps field names to checkers, the way a component
//! declares the types of its properties. [`PropTypes::check`] runs every
//! checker against one record instance and collects the failures.
//!
//! A [`Reporter`] turns failures into warnings. Warnings never fail the
//! host operation; by default each distinct message is reported once, and
//! nothing is checked in release builds.
//!
//! # Examples
//!
//! ```rust
//! use proptype::foundation::Location;
//! use proptype::host::{PropTypes, Reporter, ReporterConfig};
//! use proptype::{Checker, Predicate, PrimitiveKind};
//! use serde_json::json;
//!
//! let prop_types = PropTypes::new()
//!     .field(
//!         "title",
//!         Checker::of_kind(PrimitiveKind::String, Predicate::named("non_empty", |v| v != ""))?
//!             .required(),
//!     )
//!     .field(
//!         "count",
//!         Checker::of_kind(PrimitiveKind::Number, Predicate::new(|_| true))?,
//!     );
//!
//! let record = json!({ "count": "three" }).as_object().cloned().unwrap_or_default();
//! let failures = prop_types.check(&record, Some("Header"), Location::Prop);
//! assert_eq!(failures.len(), 2);
//!
//! let reporter = Reporter::new(ReporterConfig { enabled: true, deduplicate: true });
//! assert_eq!(reporter.report(&prop_types, &record, Some("Header"), Location::Prop), 2);
//! // Same failures again: already reported.
//! assert_eq!(reporter.report(&prop_types, &record, Some("Header"), Location::Prop), 0);
//! # Ok::<(), proptype::ConstructionError>(())
//! ```

use crate::foundation::{CheckField, FieldContext, Location, Record, ValidationError};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// FIELD TABLE
// ============================================================================

type SharedCheck = Arc<dyn CheckField + Send + Sync>;

/// Declared checkers for the fields of one kind of record, in declaration order.
#[derive(Clone, Default)]
pub struct PropTypes {
    fields: IndexMap<String, SharedCheck>,
}

/// One failed field of a [`PropTypes::check`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub error: ValidationError,
}

impl PropTypes {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a checker for `name`, replacing any previous declaration.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(
        mut self,
        name: impl Into<String>,
        check: impl CheckField + Send + Sync + 'static,
    ) -> Self {
        self.insert(name, check);
        self
    }

    /// Declares a checker for `name`, replacing any previous declaration.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        check: impl CheckField + Send + Sync + 'static,
    ) {
        self.fields.insert(name.into(), Arc::new(check));
    }

    /// Declared field names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Runs every declared checker against `record`.
    pub fn check(
        &self,
        record: &Record,
        entity: Option<&str>,
        location: Location,
    ) -> Vec<FieldFailure> {
        self.fields
            .iter()
            .filter_map(|(name, check)| {
                let ctx = FieldContext::new(name).maybe_entity(entity).at(location);
                check.check(record, &ctx).err().map(|error| FieldFailure {
                    field: name.clone(),
                    error,
                })
            })
            .collect()
    }
}

impl fmt::Debug for PropTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropTypes")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// REPORTER CONFIG
// ============================================================================

/// Reporter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Whether records are checked at all. Defaults to on in debug builds only.
    pub enabled: bool,
    /// Report each distinct message once.
    pub deduplicate: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            deduplicate: true,
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Text of the warning surfaced for a failed check.
#[must_use]
pub fn warning_message(location: Location, error: &ValidationError) -> String {
    format!("Failed {location} type: {error}")
}

/// Destination for warnings.
pub trait WarningSink: Send + Sync {
    fn warn(&self, location: Location, entity: Option<&str>, failure: &FieldFailure);
}

/// Emits warnings as `tracing` events at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, location: Location, entity: Option<&str>, failure: &FieldFailure) {
        tracing::warn!(
            location = location.tag(),
            entity,
            field = %failure.field,
            code = failure.error.code(),
            "{}",
            warning_message(location, &failure.error)
        );
    }
}

impl<S: WarningSink + ?Sized> WarningSink for Arc<S> {
    fn warn(&self, location: Location, entity: Option<&str>, failure: &FieldFailure) {
        (**self).warn(location, entity, failure);
    }
}

// ============================================================================
// REPORTER
// ============================================================================

/// Checks records and surfaces failures as warnings.
pub struct Reporter<S = TracingSink> {
    config: ReporterConfig,
    sink: S,
    reported: Mutex<HashSet<String>>,
}

impl Reporter<TracingSink> {
    /// A reporter that warns through `tracing`.
    #[must_use]
    pub fn new(config: ReporterConfig) -> Self {
        Self::with_sink(config, TracingSink)
    }
}

impl Default for Reporter<TracingSink> {
    fn default() -> Self {
        Self::new(ReporterConfig::default())
    }
}

impl<S: WarningSink> Reporter<S> {
    /// A reporter that warns through `sink`.
    pub fn with_sink(config: ReporterConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            reported: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Checks `record` against `prop_types` and warns about each failure.
    ///
    /// Returns the number of warnings emitted.
    pub fn report(
        &self,
        prop_types: &PropTypes,
        record: &Record,
        entity: Option<&str>,
        location: Location,
    ) -> usize {
        if !self.config.enabled {
            return 0;
        }

        let mut emitted = 0;
        for failure in prop_types.check(record, entity, location) {
            if self.config.deduplicate
                && !self.reported.lock().insert(failure.error.message.to_string())
            {
                continue;
            }
            self.sink.warn(location, entity, &failure);
            emitted += 1;
        }
        emitted
    }

    /// Forgets which messages were already reported.
    pub fn reset(&self) {
        self.reported.lock().clear();
    }
}

impl<S> fmt::Debug for Reporter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("config", &self.config)
            .field("reported", &self.reported.lock().len())
            .finish()
    }
}

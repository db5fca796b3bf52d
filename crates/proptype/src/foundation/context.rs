//! Per-call context: where a value came from and who it belongs to.

use std::fmt;
use std::str::FromStr;

/// Entity name used in messages when the caller supplies none.
pub const ANONYMOUS: &str = "<<anonymous>>";

// ============================================================================
// LOCATION
// ============================================================================

/// The structural context a field was found in.
///
/// Only affects message wording.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    /// A property passed to the entity.
    #[default]
    Prop,
    /// A value read from the surrounding context.
    Context,
    /// A value the entity provides to its children.
    ChildContext,
}

impl Location {
    /// Word used for this location in messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Prop => "prop",
            Self::Context => "context",
            Self::ChildContext => "child context",
        }
    }

    /// Tag accepted by [`FromStr`] and used by serde.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Prop => "prop",
            Self::Context => "context",
            Self::ChildContext => "childContext",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when parsing an unknown location tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown location `{0}`, expected one of `prop`, `context`, `childContext`")]
pub struct UnknownLocation(pub String);

impl FromStr for Location {
    type Err = UnknownLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prop" => Ok(Self::Prop),
            "context" => Ok(Self::Context),
            "childContext" => Ok(Self::ChildContext),
            other => Err(UnknownLocation(other.to_owned())),
        }
    }
}

// ============================================================================
// FIELD CONTEXT
// ============================================================================

/// Identifies the value a checker is asked to inspect.
///
/// # Examples
///
/// ```rust
/// use proptype::foundation::{FieldContext, Location};
///
/// let ctx = FieldContext::new("title")
///     .entity("Header")
///     .at(Location::Context);
///
/// assert_eq!(ctx.entity_name(), "Header");
/// assert_eq!(ctx.display_field_name(), "title");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContext<'a> {
    field_name: &'a str,
    entity_name: Option<&'a str>,
    location: Location,
    display_field_name: Option<&'a str>,
}

impl<'a> FieldContext<'a> {
    /// Context for `field_name` as a [`Location::Prop`] of an anonymous entity.
    #[must_use]
    pub const fn new(field_name: &'a str) -> Self {
        Self {
            field_name,
            entity_name: None,
            location: Location::Prop,
            display_field_name: None,
        }
    }

    /// Sets the enclosing entity name.
    #[must_use = "builder methods must be chained or built"]
    pub const fn entity(mut self, name: &'a str) -> Self {
        self.entity_name = Some(name);
        self
    }

    /// Sets the enclosing entity name, if any.
    #[must_use = "builder methods must be chained or built"]
    pub const fn maybe_entity(mut self, name: Option<&'a str>) -> Self {
        self.entity_name = name;
        self
    }

    /// Sets the location.
    #[must_use = "builder methods must be chained or built"]
    pub const fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets the full name shown in "required" messages, e.g. `items[0].id`.
    #[must_use = "builder methods must be chained or built"]
    pub const fn display_name(mut self, name: &'a str) -> Self {
        self.display_field_name = Some(name);
        self
    }

    /// Key looked up in the record.
    #[must_use]
    pub const fn field_name(&self) -> &'a str {
        self.field_name
    }

    /// Entity name, or [`ANONYMOUS`] when none was given.
    #[must_use]
    pub fn entity_name(&self) -> &'a str {
        match self.entity_name {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS,
        }
    }

    /// Display name, falling back to the field name.
    #[must_use]
    pub fn display_field_name(&self) -> &'a str {
        match self.display_field_name {
            Some(name) if !name.is_empty() => name,
            _ => self.field_name,
        }
    }

    /// Where the value came from.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }
}

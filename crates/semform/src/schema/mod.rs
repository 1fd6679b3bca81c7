//! Schema introspection interface.
//!
//! The composition engine never talks to a concrete model type. Everything it
//! needs to know about a bound object goes through two traits:
//!
//! - [`Schema`]: structural metadata (column types, required-ness,
//!   associations, content columns)
//! - [`FormObject`]: a bound instance (current values, validation errors,
//!   persistence state, nested sub-objects)
//!
//! [`Record`] is an in-memory implementation that can be built in code or
//! loaded from YAML/JSON, useful for tests and for applications whose data
//! is already dynamic.
//!
//! # Missing Information
//!
//! Introspection is allowed to fail. [`Schema::column_type`] and
//! [`Schema::content_columns`] return [`SchemaUnavailable`] when the object
//! cannot be classified; callers in this crate treat that as "no
//! information" and fall back to name heuristics and defaults.

mod record;

pub use record::{Association, Column, Record};

use serde::{Deserialize, Serialize};

/// Semantic type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Short text, the only type that name heuristics may refine.
    String,
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    Datetime,
    Timestamp,
    Time,
    Binary,
}

/// Kind of an association between two objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// Single reference held by this object (`author_id`).
    BelongsTo,
    /// Single reference held by the other object.
    HasOne,
    /// One-to-many collection.
    HasMany,
    /// Many-to-many collection.
    HasAndBelongsToMany,
}

impl AssociationKind {
    /// Returns `true` for one-to-many and many-to-many associations.
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            AssociationKind::HasMany | AssociationKind::HasAndBelongsToMany
        )
    }
}

/// The object could not be introspected for the requested information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schema unavailable for {subject}: {reason}")]
pub struct SchemaUnavailable {
    pub subject: String,
    pub reason: String,
}

impl SchemaUnavailable {
    pub fn new(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// Structural metadata about a bound object.
pub trait Schema {
    /// Column type of `field`, `Ok(None)` if the object has no such column.
    fn column_type(&self, field: &str) -> Result<Option<ColumnType>, SchemaUnavailable>;

    /// Whether `field` must be filled in, `None` if unknown.
    fn is_required(&self, field: &str) -> Option<bool>;

    /// Association kind of `field`, `None` if it is not an association.
    fn association(&self, field: &str) -> Option<AssociationKind>;

    /// Association names of the given kinds, in declaration order.
    fn associations(&self, kinds: &[AssociationKind]) -> Vec<String>;

    /// Columns that hold user content (no primary key, foreign keys,
    /// counter caches or type discriminators), in declaration order.
    fn content_columns(&self) -> Result<Vec<String>, SchemaUnavailable>;
}

/// A bound object rendered by a form.
pub trait FormObject: Schema {
    /// Singular model name, used for default object names and button labels.
    fn model_name(&self) -> &str;

    /// Current value of `field`.
    fn value(&self, field: &str) -> Option<serde_json::Value>;

    /// Validation errors on `field`.
    fn errors_on(&self, field: &str) -> Vec<String>;

    /// Validation errors not tied to a field.
    fn base_errors(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether the object has not been saved yet.
    fn is_new_record(&self) -> bool {
        true
    }

    /// Sub-objects reachable through `association`, in order.
    fn nested_objects(&self, association: &str) -> Vec<&dyn FormObject>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_kinds() {
        assert!(AssociationKind::HasMany.is_collection());
        assert!(AssociationKind::HasAndBelongsToMany.is_collection());
        assert!(!AssociationKind::BelongsTo.is_collection());
        assert!(!AssociationKind::HasOne.is_collection());
    }

    #[test]
    fn test_column_type_names() {
        let t: ColumnType = serde_yaml::from_str("datetime").unwrap();
        assert_eq!(t, ColumnType::Datetime);
    }
}

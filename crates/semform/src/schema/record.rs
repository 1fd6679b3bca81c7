//! In-memory bound objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AssociationKind, ColumnType, FormObject, Schema, SchemaUnavailable};
use crate::error::{FormError, Result};

/// A column declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
    /// Presence is validated.
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

/// An association declaration with its loaded sub-objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    pub kind: AssociationKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// A data-driven [`FormObject`].
///
/// # Example
///
/// ```rust
/// use semform::{ColumnType, Record, Schema};
///
/// let post = Record::new("post")
///     .column("title", ColumnType::String)
///     .required_column("body", ColumnType::Text)
///     .with_value("title", "Hello");
///
/// assert_eq!(post.is_required("body"), Some(true));
/// assert_eq!(post.is_required("title"), Some(false));
/// ```
///
/// Records also load from YAML:
///
/// ```rust
/// use semform::{Record, Schema};
///
/// let post = Record::from_yaml(r#"
/// model: post
/// columns:
///   - { name: title, type: string, required: true }
///   - { name: published, type: boolean }
/// associations:
///   - { name: author, kind: belongs_to }
/// "#).unwrap();
///
/// assert_eq!(post.content_columns().unwrap(), vec!["title", "published"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub model: String,
    pub columns: Vec<Column>,
    pub associations: Vec<Association>,
    pub values: BTreeMap<String, Value>,
    pub errors: BTreeMap<String, Vec<String>>,
    pub base_errors: Vec<String>,
    pub persisted: bool,
    /// When `false`, column lookups report [`SchemaUnavailable`].
    pub introspectable: bool,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            model: String::new(),
            columns: Vec::new(),
            associations: Vec::new(),
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
            base_errors: Vec::new(),
            persisted: false,
            introspectable: true,
        }
    }
}

impl Record {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// A record whose columns cannot be introspected.
    pub fn opaque(model: impl Into<String>) -> Self {
        Self {
            introspectable: false,
            ..Self::new(model)
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| FormError::Config(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FormError::Config(e.to_string()))
    }

    pub fn column(mut self, name: impl Into<String>, kind: ColumnType) -> Self {
        self.columns.push(Column {
            name: name.into(),
            kind,
            required: false,
            nullable: true,
        });
        self
    }

    /// Adds a column with a presence validation.
    pub fn required_column(mut self, name: impl Into<String>, kind: ColumnType) -> Self {
        self.columns.push(Column {
            name: name.into(),
            kind,
            required: true,
            nullable: true,
        });
        self
    }

    pub fn associate(mut self, name: impl Into<String>, kind: AssociationKind) -> Self {
        self.associations.push(Association {
            name: name.into(),
            kind,
            required: false,
            records: Vec::new(),
        });
        self
    }

    /// Adds an association with loaded sub-objects.
    pub fn nested(
        mut self,
        name: impl Into<String>,
        kind: AssociationKind,
        records: Vec<Record>,
    ) -> Self {
        self.associations.push(Association {
            name: name.into(),
            kind,
            required: false,
            records,
        });
        self
    }

    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    pub fn base_error(mut self, message: impl Into<String>) -> Self {
        self.base_errors.push(message.into());
        self
    }

    pub fn persisted(mut self, persisted: bool) -> Self {
        self.persisted = persisted;
        self
    }

    fn find_column(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == field)
    }

    fn find_association(&self, field: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.name == field)
    }

    fn unavailable(&self, what: &str) -> SchemaUnavailable {
        SchemaUnavailable::new(
            format!("{}.{}", self.model, what),
            "record is not introspectable",
        )
    }
}

impl Schema for Record {
    fn column_type(&self, field: &str) -> std::result::Result<Option<ColumnType>, SchemaUnavailable> {
        if !self.introspectable {
            return Err(self.unavailable(field));
        }
        Ok(self.find_column(field).map(|c| c.kind))
    }

    fn is_required(&self, field: &str) -> Option<bool> {
        if let Some(column) = self.find_column(field) {
            return Some(column.required || !column.nullable);
        }
        self.find_association(field).map(|a| a.required)
    }

    fn association(&self, field: &str) -> Option<AssociationKind> {
        self.find_association(field).map(|a| a.kind)
    }

    fn associations(&self, kinds: &[AssociationKind]) -> Vec<String> {
        self.associations
            .iter()
            .filter(|a| kinds.contains(&a.kind))
            .map(|a| a.name.clone())
            .collect()
    }

    fn content_columns(&self) -> std::result::Result<Vec<String>, SchemaUnavailable> {
        if !self.introspectable {
            return Err(self.unavailable("content_columns"));
        }
        Ok(self
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| {
                *name != "id" && *name != "type" && !name.ends_with("_id") && !name.ends_with("_count")
            })
            .map(String::from)
            .collect())
    }
}

impl FormObject for Record {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn value(&self, field: &str) -> Option<Value> {
        self.values.get(field).cloned()
    }

    fn errors_on(&self, field: &str) -> Vec<String> {
        self.errors.get(field).cloned().unwrap_or_default()
    }

    fn base_errors(&self) -> Vec<String> {
        self.base_errors.clone()
    }

    fn is_new_record(&self) -> bool {
        !self.persisted
    }

    fn nested_objects(&self, association: &str) -> Vec<&dyn FormObject> {
        self.find_association(association)
            .map(|a| a.records.iter().map(|r| r as &dyn FormObject).collect())
            .unwrap_or_default()
    }
}

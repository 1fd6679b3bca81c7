//! Form configuration.
//!
//! [`FormConfig`] collects the knobs that shape every rendered field: the
//! order of sub-parts, how inline errors are shown, the required marker,
//! which columns are never inferred, and the nesting limit. It is built once
//! at startup and shared read-only by all forms.
//!
//! # YAML
//!
//! Any subset of keys may be given; the rest keep their defaults.
//!
//! ```rust
//! use semform::{FormConfig, InlineErrors, InputType, Part};
//!
//! let config = FormConfig::from_yaml(r#"
//! inline_errors: list
//! required_marker: "(required)"
//! custom_inline_order:
//!   boolean: [control, label, errors]
//! "#).unwrap();
//!
//! assert_eq!(config.inline_errors, InlineErrors::List);
//! assert_eq!(
//!     config.parts_for(&InputType::Boolean),
//!     vec![Part::Control, Part::Label, Part::Errors]
//! );
//! assert_eq!(config.parts_for(&InputType::String).len(), 4);
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{FormError, Result};
use crate::input_type::InputType;
use crate::registry::Part;

/// Columns skipped when a group infers its fields from the schema.
pub const RESERVED_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "created_on",
    "updated_on",
    "lock_version",
    "version",
];

/// How validation errors are rendered next to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineErrors {
    /// All errors joined into one sentence.
    #[default]
    Sentence,
    /// One list item per error.
    List,
    /// Only the first error.
    First,
    /// Errors are not rendered inline.
    None,
}

/// Settings shared by every form rendered with them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Default sub-part order.
    pub inline_order: Vec<Part>,
    /// Per input type sub-part order, replacing `inline_order`.
    pub custom_inline_order: HashMap<InputType, Vec<Part>>,
    pub inline_errors: InlineErrors,
    /// Appended to labels of required fields; empty to disable.
    pub required_marker: String,
    /// Appended to labels of optional fields; empty to disable.
    pub optional_marker: String,
    /// Required-ness when neither the caller nor the schema knows.
    pub all_fields_required_by_default: bool,
    /// Never inferred into groups.
    pub reserved_columns: Vec<String>,
    /// Joins rendered sub-parts.
    pub part_separator: String,
    /// Class of groups that do not set one.
    pub default_group_class: String,
    /// Deepest allowed nested group.
    pub max_nesting_depth: usize,
    pub include_blank_for_select_by_default: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            inline_order: vec![Part::Label, Part::Control, Part::Hint, Part::Errors],
            custom_inline_order: HashMap::new(),
            inline_errors: InlineErrors::Sentence,
            required_marker: "*".to_string(),
            optional_marker: String::new(),
            all_fields_required_by_default: false,
            reserved_columns: RESERVED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            part_separator: "\n".to_string(),
            default_group_class: "inputs".to_string(),
            max_nesting_depth: 8,
            include_blank_for_select_by_default: true,
        }
    }
}

impl FormConfig {
    /// Parses a configuration from YAML and validates it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: FormConfig =
            serde_yaml::from_str(yaml).map_err(|e| FormError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FormError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(FormError::Config(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        let orders = std::iter::once(("inline_order".to_string(), &self.inline_order)).chain(
            self.custom_inline_order
                .iter()
                .map(|(tag, order)| (format!("custom_inline_order.{}", tag), order)),
        );
        for (key, order) in orders {
            if order.iter().filter(|p| **p == Part::Control).count() != 1 {
                return Err(FormError::Config(format!(
                    "{} must contain the control part exactly once",
                    key
                )));
            }
            let mut seen = order.clone();
            seen.sort();
            seen.dedup();
            if seen.len() != order.len() {
                return Err(FormError::Config(format!("{} repeats a part", key)));
            }
        }
        Ok(())
    }

    /// The sub-parts rendered for `input_type`, in order.
    ///
    /// Hidden inputs never render hints or errors.
    pub fn parts_for(&self, input_type: &InputType) -> Vec<Part> {
        let order = self
            .custom_inline_order
            .get(input_type)
            .unwrap_or(&self.inline_order);
        order
            .iter()
            .copied()
            .filter(|part| {
                *input_type != InputType::Hidden || !matches!(part, Part::Hint | Part::Errors)
            })
            .collect()
    }

    /// Builder-style override of the order for one input type.
    pub fn with_inline_order(mut self, input_type: InputType, parts: Vec<Part>) -> Self {
        self.custom_inline_order.insert(input_type, parts);
        self
    }

    pub fn is_reserved(&self, column: &str) -> bool {
        self.reserved_columns.iter().any(|c| c == column)
    }
}

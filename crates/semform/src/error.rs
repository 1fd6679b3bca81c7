//! Error types for form composition.
//!
//! Configuration mistakes (unknown input types, conflicting group arguments,
//! runaway nesting) surface as [`FormError`]. Gaps in schema information are
//! not errors: they travel as [`SchemaUnavailable`](crate::schema::SchemaUnavailable)
//! and are absorbed by the resolver.

use semform_markup::MarkupError;

use crate::registry::Part;

/// Errors returned by form rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// No layer of the registry binds a renderer to this input type.
    #[error("unknown input type '{tag}' (searched layers: {})", .layers.join(", "))]
    UnknownInputType { tag: String, layers: Vec<String> },

    /// No layer of the registry renders this sub-part.
    #[error("no renderer for the {part} part (searched layers: {})", .layers.join(", "))]
    MissingPartRenderer { part: Part, layers: Vec<String> },

    /// Group arguments that cannot be combined.
    #[error("malformed field list: '{option}' {reason}")]
    MalformedFieldList { option: String, reason: String },

    /// Nested inputs went deeper than the configured limit.
    #[error("nested inputs reached depth {depth}, over the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    /// A nested group named something that is not an association.
    #[error("'{name}' is not an association of {model}")]
    UnknownAssociation { name: String, model: String },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Markup writing failed.
    #[error(transparent)]
    Markup(#[from] MarkupError),
}

impl FormError {
    pub(crate) fn malformed(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedFieldList {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_input_type_lists_layers() {
        let err = FormError::UnknownInputType {
            tag: "colour".into(),
            layers: vec!["admin".into(), "base".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'colour'"));
        assert!(msg.contains("admin, base"));
    }

    #[test]
    fn test_malformed_names_option() {
        let err = FormError::malformed("for", "cannot be combined with a block");
        assert!(err.to_string().contains("'for'"));
    }
}

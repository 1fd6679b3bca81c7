//! Per-field caller options.

use std::collections::BTreeMap;

use semform_markup::Attributes;
use serde_json::Value;

use crate::input_type::InputType;

/// One entry of a select, radio or checkbox collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::new(value, value)
    }
}

impl<L: Into<String>, V: Into<String>> From<(L, V)> for Choice {
    fn from((label, value): (L, V)) -> Self {
        Choice::new(label, value)
    }
}

/// Caller overrides for a single field.
///
/// Everything is optional; unset options are derived from the schema and
/// the form configuration.
///
/// ```rust
/// use semform::{InputOptions, InputType};
///
/// let options = InputOptions::new()
///     .input_type(InputType::Radio)
///     .collection([("Draft", "draft"), ("Published", "published")])
///     .hint("Only published posts are listed")
///     .wrapper_html("class", "status");
/// assert_eq!(options.collection.as_ref().map(Vec::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOptions {
    /// Explicit input type, bypassing resolution.
    pub input_type: Option<InputType>,
    /// Explicit required flag, bypassing schema metadata.
    pub required: Option<bool>,
    pub label: Option<String>,
    pub hide_label: bool,
    pub hint: Option<String>,
    /// Attributes for the control element.
    pub input_html: Attributes,
    /// Attributes for the `<li>` wrapper.
    pub wrapper_html: Attributes,
    pub label_html: Attributes,
    pub collection: Option<Vec<Choice>>,
    pub include_blank: Option<bool>,
    /// Free-form options for application renderers.
    pub extra: BTreeMap<String, Value>,
}

impl InputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hide_label(mut self) -> Self {
        self.hide_label = true;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn input_html(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.input_html.set(name, value);
        self
    }

    pub fn wrapper_html(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.wrapper_html.set(name, value);
        self
    }

    pub fn label_html(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.label_html.set(name, value);
        self
    }

    pub fn collection<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        self.collection = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn include_blank(mut self, include_blank: bool) -> Self {
        self.include_blank = Some(include_blank);
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_conversions() {
        assert_eq!(Choice::from("UTC"), Choice::new("UTC", "UTC"));
        assert_eq!(Choice::from(("Alice", "1")), Choice::new("Alice", "1"));
    }

    #[test]
    fn test_builder_sets_nested_html() {
        let options = InputOptions::new()
            .input_html("id", "custom")
            .label_html("class", "big")
            .option("rows", 4);
        assert_eq!(options.input_html.get("id"), Some("custom"));
        assert_eq!(options.label_html.get("class"), Some("big"));
        assert_eq!(options.extra.get("rows"), Some(&Value::from(4)));
    }
}

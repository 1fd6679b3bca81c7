//! Field and group composition.
//!
//! A [`FormBuilder`] binds an object name, an optional [`FormObject`], a
//! [`FormConfig`] and a [`Registry`]. It is cheap to create and holds only
//! borrows, so the usual pattern is one builder per rendered form:
//!
//! ```rust
//! use semform::{ColumnType, FormBuilder, FormConfig, InputOptions, Record, Registry};
//!
//! let config = FormConfig::default();
//! let registry = Registry::default();
//! let post = Record::new("post").required_column("title", ColumnType::String);
//!
//! let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
//! let html = form.input("title", &InputOptions::new()).unwrap();
//!
//! assert!(html.starts_with(r#"<li class="string required" id="post_title_input">"#));
//! ```
//!
//! Rendering a field goes through three steps:
//!
//! 1. [`FormBuilder::describe`] resolves the input type and required flag
//!    and computes ids, names and wrapper classes into a [`Field`]
//! 2. the configured parts are rendered through the registry
//! 3. non-empty parts are joined and wrapped in an `<li>`
//!
//! Groups ([`FormBuilder::inputs`]) repeat this per field inside a
//! `<fieldset>`, and recurse into nested associations.

mod buttons;
mod group;
pub mod naming;

pub use buttons::ButtonOptions;
pub use group::{GroupArg, GroupArgs, NestedTarget};

use log::trace;
use semform_markup::{class_list, element, Attributes};
use serde_json::Value;

use crate::config::FormConfig;
use crate::error::Result;
use crate::input_type::InputType;
use crate::options::InputOptions;
use crate::registry::{Part, Registry};
use crate::resolve::{resolve_input_type, resolve_required};
use crate::schema::{AssociationKind, FormObject};
use naming::{control_method, dom_id, input_name};

/// A fully resolved field, handed to every part renderer.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub name: &'a str,
    pub input_type: InputType,
    pub required: bool,
    pub options: &'a InputOptions,
    pub association: Option<AssociationKind>,
    /// Validation errors reported by the bound object.
    pub errors: Vec<String>,
    /// `<li>` attributes with the computed id and class list.
    pub wrapper_html: Attributes,
    /// Label attributes with `for` pointing at the control.
    pub label_html: Attributes,
    pub control_id: String,
    /// Submitted parameter name, with a trailing `[]` for multi-value controls.
    pub control_name: String,
    /// The attribute the control submits (`author` → `author_id`).
    pub method: String,
}

impl Field<'_> {
    /// Returns `true` if the control submits a list of values.
    pub fn is_multiple(&self) -> bool {
        match self.input_type {
            InputType::CheckBoxes => true,
            InputType::Select => self.association.is_some_and(AssociationKind::is_collection),
            _ => false,
        }
    }
}

/// Renders fields and groups for one bound object.
#[derive(Clone, Copy)]
pub struct FormBuilder<'a> {
    object_name: &'a str,
    object: Option<&'a dyn FormObject>,
    config: &'a FormConfig,
    registry: &'a Registry,
    depth: usize,
}

impl std::fmt::Debug for FormBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBuilder")
            .field("object_name", &self.object_name)
            .field("model", &self.object.map(|o| o.model_name()))
            .field("depth", &self.depth)
            .finish()
    }
}

impl<'a> FormBuilder<'a> {
    /// Creates a builder, checking that `registry` can render every input
    /// type `config` names.
    pub fn new(
        object_name: &'a str,
        object: Option<&'a dyn FormObject>,
        config: &'a FormConfig,
        registry: &'a Registry,
    ) -> Result<Self> {
        registry.check_config(config)?;
        Ok(Self {
            object_name,
            object,
            config,
            registry,
            depth: 0,
        })
    }

    /// Creates a builder named after the object's model.
    pub fn for_object(
        object: &'a dyn FormObject,
        config: &'a FormConfig,
        registry: &'a Registry,
    ) -> Result<Self> {
        Self::new(object.model_name(), Some(object), config, registry)
    }

    pub fn object_name(&self) -> &str {
        self.object_name
    }

    pub fn object(&self) -> Option<&'a dyn FormObject> {
        self.object
    }

    pub fn config(&self) -> &'a FormConfig {
        self.config
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Nesting level, `0` for the top-level form.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current value of `field` on the bound object.
    pub fn value(&self, field: &str) -> Option<Value> {
        self.object.and_then(|o| o.value(field))
    }

    /// Current value as a single string; `None` for missing, null or list
    /// values.
    pub fn value_string(&self, field: &str) -> Option<String> {
        self.value(field).as_ref().and_then(scalar_string)
    }

    /// Current value as a list of strings, for multi-value controls.
    pub fn value_strings(&self, field: &str) -> Vec<String> {
        match self.value(field) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_string).collect(),
            Some(value) => scalar_string(&value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Resolves everything the part renderers need to know about a field.
    pub fn describe<'f>(&'f self, name: &'f str, options: &'f InputOptions) -> Field<'f> {
        let input_type = resolve_input_type(name, options.input_type.as_ref(), self.object);
        let required = resolve_required(name, options.required, self.object, self.config);
        let association = self.object.and_then(|o| o.association(name));
        let method = control_method(name, association);

        let mut errors = self.object.map(|o| o.errors_on(name)).unwrap_or_default();
        if method != name {
            errors.extend(self.object.map(|o| o.errors_on(&method)).unwrap_or_default());
        }

        let state = if required { "required" } else { "optional" };
        let mut wrapper_html = options.wrapper_html.clone();
        let class = {
            let caller = options
                .wrapper_html
                .class_tokens()
                .into_iter()
                .filter(|c| *c != "required" && *c != "optional");
            let error = (!errors.is_empty()).then_some("error");
            class_list(
                [input_type.as_str(), state]
                    .into_iter()
                    .chain(error)
                    .chain(caller),
            )
        };
        wrapper_html.set("class", class);
        wrapper_html.set_default("id", dom_id(self.object_name, &format!("{}_input", name)));

        let control_id = options
            .input_html
            .get("id")
            .map(String::from)
            .unwrap_or_else(|| dom_id(self.object_name, &method));
        let mut label_html = options.label_html.clone();
        label_html.set_default("for", control_id.as_str());

        let mut field = Field {
            name,
            input_type,
            required,
            options,
            association,
            errors,
            wrapper_html,
            label_html,
            control_id,
            control_name: input_name(self.object_name, &method),
            method,
        };
        if field.is_multiple() {
            field.control_name.push_str("[]");
        }
        field
    }

    /// Renders one field as an `<li>` of its configured parts.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownInputType`](crate::FormError::UnknownInputType)
    /// if no registry layer renders the resolved type, even when the control
    /// part is left out of the configured order.
    pub fn input(&self, name: &str, options: &InputOptions) -> Result<String> {
        let field = self.describe(name, options);
        let control = self.registry.lookup(&field.input_type)?;

        let mut parts = Vec::new();
        for part in self.config.parts_for(&field.input_type) {
            let out = match part {
                Part::Control => control.render(&field, self)?,
                other => self.registry.lookup_part(other)?.render(&field, self)?,
            };
            if !out.is_empty() {
                parts.push(out);
            }
        }
        trace!(
            "{}[{}]: {} ({} parts)",
            self.object_name,
            name,
            field.input_type,
            parts.len()
        );

        Ok(element(
            "li",
            &parts.join(&self.config.part_separator),
            &field.wrapper_html,
        )?)
    }

    /// A builder for a nested sub-object, one level deeper.
    fn child<'c>(&self, object_name: &'c str, object: &'c dyn FormObject) -> FormBuilder<'c>
    where
        'a: 'c,
    {
        FormBuilder {
            object_name,
            object: Some(object),
            config: self.config,
            registry: self.registry,
            depth: self.depth + 1,
        }
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

//! Layered renderer registry.
//!
//! A [`Registry`] maps input types to control renderers and sub-parts
//! (label, hint, errors) to part renderers. Bindings live in named
//! [`Layer`]s stacked from least to most specific:
//!
//! ```text
//! "admin"  (most specific)   Select -> admin_select
//! "app"                      Custom("colour") -> colour_picker, Label -> app_label
//! "base"   (least specific)  every core tag, Label, Hint, Errors
//! ```
//!
//! Lookup walks the stack from the top and the first layer that binds the
//! key wins. This lets an application override exactly one input type for
//! one kind of form without touching the rest.
//!
//! # Resolution Once
//!
//! The walk happens in [`RegistryBuilder::build`], which flattens the stack
//! into a read-only table. Rendering only reads that table, so a built
//! registry can be shared across threads. To change bindings, build again.
//!
//! # Example
//!
//! ```rust
//! use semform::{InputType, Layer, RegistryBuilder};
//!
//! let registry = RegistryBuilder::with_defaults()
//!     .layer(Layer::new("admin").control(InputType::Select, |field, _form| {
//!         Ok(format!("<admin-select name=\"{}\"></admin-select>", field.control_name))
//!     }))
//!     .build();
//!
//! assert_eq!(registry.origin(&InputType::Select), Some("admin"));
//! assert_eq!(registry.origin(&InputType::String), Some("base"));
//! ```

pub mod controls;
pub mod parts;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::builder::{Field, FormBuilder};
use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::input_type::InputType;

/// Name of the layer installed by [`RegistryBuilder::with_defaults`].
pub const BASE_LAYER: &str = "base";

/// A sub-part of a rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Label,
    /// The input control itself, dispatched on the field's input type.
    Control,
    Hint,
    Errors,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Part::Label => "label",
            Part::Control => "control",
            Part::Hint => "hint",
            Part::Errors => "errors",
        })
    }
}

/// Renders one part of a field.
///
/// Returning an empty string means "nothing to show"; the part composer
/// drops it instead of emitting an empty container.
///
/// Closures with the right signature implement this trait.
pub trait InputRenderer: Send + Sync {
    fn render(&self, field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String>;
}

impl<F> InputRenderer for F
where
    F: Fn(&Field<'_>, &FormBuilder<'_>) -> Result<String> + Send + Sync,
{
    fn render(&self, field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
        self(field, form)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum BindingKey {
    Control(InputType),
    Part(Part),
}

/// One level of the registry stack.
pub struct Layer {
    name: String,
    bindings: HashMap<BindingKey, Arc<dyn InputRenderer>>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds a control renderer for `input_type`.
    pub fn control<F>(self, input_type: InputType, renderer: F) -> Self
    where
        F: Fn(&Field<'_>, &FormBuilder<'_>) -> Result<String> + Send + Sync + 'static,
    {
        self.control_renderer(input_type, Arc::new(renderer))
    }

    /// Binds a shared control renderer for `input_type`.
    pub fn control_renderer(mut self, input_type: InputType, renderer: Arc<dyn InputRenderer>) -> Self {
        self.bindings.insert(BindingKey::Control(input_type), renderer);
        self
    }

    /// Binds a renderer for a sub-part.
    ///
    /// [`Part::Control`] cannot be bound here: controls are bound per input
    /// type with [`control`](Self::control).
    pub fn part<F>(self, part: Part, renderer: F) -> Self
    where
        F: Fn(&Field<'_>, &FormBuilder<'_>) -> Result<String> + Send + Sync + 'static,
    {
        self.part_renderer(part, Arc::new(renderer))
    }

    pub fn part_renderer(mut self, part: Part, renderer: Arc<dyn InputRenderer>) -> Self {
        if part != Part::Control {
            self.bindings.insert(BindingKey::Part(part), renderer);
        }
        self
    }

    /// Returns `true` if this layer binds a control for `input_type`.
    pub fn binds(&self, input_type: &InputType) -> bool {
        self.bindings
            .contains_key(&BindingKey::Control(input_type.clone()))
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: BTreeSet<&BindingKey> = self.bindings.keys().collect();
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("bindings", &keys)
            .finish()
    }
}

/// Collects layers and builds a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Least specific first.
    layers: Vec<Layer>,
}

impl RegistryBuilder {
    /// An empty builder with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose bottom layer renders every core input type and the
    /// label, hint and errors parts.
    pub fn with_defaults() -> Self {
        Self::new().layer(base_layer())
    }

    /// Pushes a layer above all existing ones.
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Walks the layers from most to least specific, returning the first
    /// binding for `key`.
    fn walk(&self, key: &BindingKey) -> Option<(&str, &Arc<dyn InputRenderer>)> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.bindings.get(key).map(|r| (layer.name.as_str(), r)))
    }

    /// Resolves every bound key into a read-only registry.
    pub fn build(&self) -> Registry {
        let keys: BTreeSet<&BindingKey> = self
            .layers
            .iter()
            .flat_map(|layer| layer.bindings.keys())
            .collect();

        let mut resolved = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some((layer, renderer)) = self.walk(key) {
                debug!("registry: {:?} bound by layer '{}'", key, layer);
                resolved.insert(
                    key.clone(),
                    Resolved {
                        layer: layer.to_string(),
                        renderer: Arc::clone(renderer),
                    },
                );
            }
        }

        Registry {
            resolved,
            layers: self.layers.iter().rev().map(|l| l.name.clone()).collect(),
        }
    }
}

struct Resolved {
    layer: String,
    renderer: Arc<dyn InputRenderer>,
}

/// A resolved, read-only renderer table.
pub struct Registry {
    resolved: HashMap<BindingKey, Resolved>,
    /// Most specific first.
    layers: Vec<String>,
}

impl Default for Registry {
    fn default() -> Self {
        RegistryBuilder::with_defaults().build()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("layers", &self.layers)
            .field("bindings", &self.resolved.len())
            .finish()
    }
}

impl Registry {
    /// Returns the control renderer for `input_type`.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownInputType`] if no layer binds it.
    pub fn lookup(&self, input_type: &InputType) -> Result<&dyn InputRenderer> {
        self.resolved
            .get(&BindingKey::Control(input_type.clone()))
            .map(|r| r.renderer.as_ref())
            .ok_or_else(|| FormError::UnknownInputType {
                tag: input_type.to_string(),
                layers: self.layers.clone(),
            })
    }

    /// Returns the renderer for a non-control part.
    pub fn lookup_part(&self, part: Part) -> Result<&dyn InputRenderer> {
        self.resolved
            .get(&BindingKey::Part(part))
            .map(|r| r.renderer.as_ref())
            .ok_or_else(|| FormError::MissingPartRenderer {
                part,
                layers: self.layers.clone(),
            })
    }

    /// Name of the layer whose control renderer won for `input_type`.
    pub fn origin(&self, input_type: &InputType) -> Option<&str> {
        self.resolved
            .get(&BindingKey::Control(input_type.clone()))
            .map(|r| r.layer.as_str())
    }

    /// Layer names, most specific first.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Checks that every input type named by `config` can be rendered.
    pub fn check_config(&self, config: &FormConfig) -> Result<()> {
        for input_type in config.custom_inline_order.keys() {
            self.lookup(input_type)?;
        }
        Ok(())
    }
}

fn base_layer() -> Layer {
    let mut layer = Layer::new(BASE_LAYER)
        .part(Part::Label, parts::label)
        .part(Part::Hint, parts::hint)
        .part(Part::Errors, parts::errors);
    for input_type in InputType::CORE {
        if let Some(renderer) = controls::default_renderer(&input_type) {
            layer = layer.control_renderer(input_type, renderer);
        }
    }
    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &'static str) -> impl Fn(&Field<'_>, &FormBuilder<'_>) -> Result<String> {
        move |_field, _form| Ok(name.to_string())
    }

    #[test]
    fn test_default_registry_binds_core_types() {
        let registry = Registry::default();
        for input_type in InputType::CORE.iter() {
            assert_eq!(registry.origin(input_type), Some(BASE_LAYER));
        }
        assert!(registry.lookup_part(Part::Label).is_ok());
        assert!(registry.lookup_part(Part::Hint).is_ok());
        assert!(registry.lookup_part(Part::Errors).is_ok());
    }

    #[test]
    fn test_most_specific_layer_wins() {
        let registry = RegistryBuilder::with_defaults()
            .layer(Layer::new("app").control(InputType::Select, named("app")))
            .layer(Layer::new("admin").control(InputType::Select, named("admin")))
            .build();
        assert_eq!(registry.origin(&InputType::Select), Some("admin"));
        assert_eq!(registry.origin(&InputType::Radio), Some(BASE_LAYER));
        assert_eq!(registry.layers(), &["admin", "app", "base"]);
    }

    #[test]
    fn test_unknown_custom_type_is_an_error() {
        let registry = Registry::default();
        let err = registry
            .lookup(&InputType::custom("colour").unwrap())
            .err()
            .unwrap();
        match err {
            FormError::UnknownInputType { tag, layers } => {
                assert_eq!(tag, "colour");
                assert_eq!(layers, vec!["base".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_registry_has_no_parts() {
        let registry = RegistryBuilder::new().build();
        assert!(matches!(
            registry.lookup_part(Part::Label),
            Err(FormError::MissingPartRenderer { part: Part::Label, .. })
        ));
    }

    #[test]
    fn test_control_part_cannot_be_bound() {
        let layer = Layer::new("x").part(Part::Control, named("nope"));
        assert!(layer.bindings.is_empty());
    }

    #[test]
    fn test_check_config_rejects_unrenderable_order() {
        let config = FormConfig::from_yaml("custom_inline_order: { colour: [control] }").unwrap();
        assert!(Registry::default().check_config(&config).is_err());

        let registry = RegistryBuilder::with_defaults()
            .layer(Layer::new("app").control(InputType::custom("colour").unwrap(), named("c")))
            .build();
        assert!(registry.check_config(&config).is_ok());
    }
}

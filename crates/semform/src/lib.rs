//! Semform - Schema-driven semantic form rendering.
//!
//! Semform turns a bound object's schema into semantically typed form
//! fields. Given a field name it decides which input to render, renders the
//! field's label, control, hint and inline errors, and composes fields into
//! fieldsets, recursing into nested associations.
//!
//! - Input types are resolved from caller overrides, associations, field
//!   names and column types
//! - Renderers live in a layered registry, so one input type can be
//!   overridden for one kind of form without touching the rest
//! - Part order, error style and markers come from a YAML-loadable config
//! - Schema gaps never fail a render; configuration mistakes always do
//!
//! # Quick Start
//!
//! ```rust
//! use semform::{
//!     AssociationKind, ColumnType, FormBuilder, FormConfig, GroupArgs, Record, Registry,
//! };
//!
//! let config = FormConfig::default();
//! let registry = Registry::default();
//!
//! let post = Record::new("post")
//!     .column("id", ColumnType::Integer)
//!     .required_column("title", ColumnType::String)
//!     .column("body", ColumnType::Text)
//!     .column("created_at", ColumnType::Datetime)
//!     .associate("author", AssociationKind::BelongsTo);
//!
//! let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
//! let html = form.inputs(GroupArgs::new()).unwrap();
//!
//! // author, title, body: keys and timestamps are left out.
//! assert_eq!(html.matches("<li class=").count(), 3);
//! assert!(html.contains(r#"<li class="select optional" id="post_author_input">"#));
//! assert!(html.contains(r#"<li class="string required" id="post_title_input">"#));
//! assert!(html.contains(r#"<li class="text optional" id="post_body_input">"#));
//! ```
//!
//! # Custom Input Types
//!
//! Unknown tags are errors, never silently rendered as text. Bind a renderer
//! in a layer above the defaults:
//!
//! ```rust
//! use semform::{FormBuilder, FormConfig, InputOptions, InputType, Layer, RegistryBuilder};
//!
//! let colour = InputType::custom("colour").unwrap();
//! let registry = RegistryBuilder::with_defaults()
//!     .layer(Layer::new("app").control(colour.clone(), |field, _form| {
//!         Ok(format!(r#"<input type="color" name="{}">"#, field.control_name))
//!     }))
//!     .build();
//! let config = FormConfig::default();
//!
//! let form = FormBuilder::new("theme", None, &config, &registry).unwrap();
//! let html = form.input("accent", &InputOptions::new().input_type(colour)).unwrap();
//! assert!(html.contains(r#"<input type="color" name="theme[accent]">"#));
//! ```

pub mod builder;
mod config;
mod error;
mod input_type;
mod options;
pub mod registry;
mod resolve;
pub mod schema;

// Re-export public API
pub use builder::{ButtonOptions, Field, FormBuilder, GroupArg, GroupArgs, NestedTarget};
pub use config::{FormConfig, InlineErrors, RESERVED_COLUMNS};
pub use error::{FormError, Result};
pub use input_type::{CustomType, InputType};
pub use options::{Choice, InputOptions};
pub use registry::{InputRenderer, Layer, Part, Registry, RegistryBuilder, BASE_LAYER};
pub use resolve::{resolve_input_type, resolve_required};
pub use schema::{
    Association, AssociationKind, Column, ColumnType, FormObject, Record, Schema,
    SchemaUnavailable,
};
pub use semform_markup::Attributes;

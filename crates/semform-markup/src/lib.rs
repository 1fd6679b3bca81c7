//! Escaped HTML element writing.
//!
//! This crate is the templating primitive underneath `semform`: it wraps
//! already-rendered inner markup in an element, escaping attribute values,
//! and escapes plain text. Rendering goes through a process-wide MiniJinja
//! environment with HTML auto-escaping, compiled once on first use.
//!
//! # Example
//!
//! ```rust
//! use semform_markup::{element, escape, void, Attributes};
//!
//! let label = element("label", &escape("Fish & Chips").unwrap(), &Attributes::new().with("for", "dish")).unwrap();
//! assert_eq!(label, r#"<label for="dish">Fish &amp; Chips</label>"#);
//!
//! let input = void("input", &Attributes::new().with("type", "text").with("value", "\"hi\"")).unwrap();
//! assert_eq!(input, r#"<input type="text" value="&quot;hi&quot;">"#);
//! ```
//!
//! # Trust Model
//!
//! The `inner` argument of [`element`] is treated as trusted markup and
//! inserted verbatim. Anything that came from user data must go through
//! [`escape`] first. Attribute values are always escaped; tag and attribute
//! names are validated instead, since escaping cannot make an arbitrary
//! string a legal name.

mod attributes;

pub use attributes::{class_list, Attributes};

use minijinja::{context, AutoEscape, Environment, Template, Value};
use once_cell::sync::Lazy;

const ELEMENT_TEMPLATE: &str =
    r#"<{{ tag }}{% for name, value in attrs %} {{ name }}="{{ value }}"{% endfor %}>{{ inner }}</{{ tag }}>"#;
const VOID_TEMPLATE: &str =
    r#"<{{ tag }}{% for name, value in attrs %} {{ name }}="{{ value }}"{% endfor %}>"#;
const TEXT_TEMPLATE: &str = "{{ text }}";

static ENV: Lazy<Result<Environment<'static>, minijinja::Error>> = Lazy::new(environment);

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_template("element", ELEMENT_TEMPLATE)?;
    env.add_template("void", VOID_TEMPLATE)?;
    env.add_template("text", TEXT_TEMPLATE)?;
    Ok(env)
}

fn template(name: &str) -> Result<Template<'static, 'static>, MarkupError> {
    match &*ENV {
        Ok(env) => Ok(env.get_template(name)?),
        Err(err) => Err(MarkupError::Setup(err.to_string())),
    }
}

/// Errors raised while writing markup.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// A tag name that is not a lowercase HTML identifier.
    #[error("invalid tag name: {0:?}")]
    InvalidTag(String),

    /// An attribute name that HTML would not parse as a single name.
    #[error("invalid attribute name: {0:?}")]
    InvalidAttribute(String),

    /// The built-in templates failed to compile.
    #[error("markup templates failed to compile: {0}")]
    Setup(String),

    /// Template engine failure.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Wraps trusted `inner` markup in `<tag attrs>...</tag>`.
pub fn element(tag: &str, inner: &str, attrs: &Attributes) -> Result<String, MarkupError> {
    check_tag(tag)?;
    let attrs = checked_attrs(attrs)?;
    let out = template("element")?.render(context! {
        tag => tag,
        attrs => attrs,
        inner => Value::from_safe_string(inner.to_string()),
    })?;
    Ok(out)
}

/// Writes an element with no content and no closing tag, such as `<input>`.
pub fn void(tag: &str, attrs: &Attributes) -> Result<String, MarkupError> {
    check_tag(tag)?;
    let attrs = checked_attrs(attrs)?;
    let out = template("void")?.render(context! { tag => tag, attrs => attrs })?;
    Ok(out)
}

/// Escapes plain text for use as element content.
pub fn escape(text: &str) -> Result<String, MarkupError> {
    Ok(template("text")?.render(context! { text => text })?)
}

fn check_tag(tag: &str) -> Result<(), MarkupError> {
    let mut chars = tag.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(MarkupError::InvalidTag(tag.to_string()))
    }
}

fn checked_attrs(attrs: &Attributes) -> Result<Vec<(&str, &str)>, MarkupError> {
    attrs
        .iter()
        .map(|(name, value)| {
            if is_attribute_name(name) {
                Ok((name, value))
            } else {
                Err(MarkupError::InvalidAttribute(name.to_string()))
            }
        })
        .collect()
}

fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

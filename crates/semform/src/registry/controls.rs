//! Default control renderers for the core input types.
//!
//! These are intentionally plain HTML5 controls. Applications that want
//! richer widgets override individual input types in their own layer.

use std::sync::Arc;

use semform_markup::{element, escape, void, Attributes};
use serde_json::Value;

use super::InputRenderer;
use crate::builder::naming::sanitize_value;
use crate::builder::{Field, FormBuilder};
use crate::error::Result;
use crate::input_type::InputType;
use crate::options::Choice;

/// Returns the base-layer renderer for a core input type, `None` for
/// custom tags.
pub fn default_renderer(input_type: &InputType) -> Option<Arc<dyn InputRenderer>> {
    let renderer: Arc<dyn InputRenderer> = match input_type {
        InputType::String => Arc::new(text_input("text")),
        InputType::Password => Arc::new(text_input("password")),
        InputType::Email => Arc::new(text_input("email")),
        InputType::Url => Arc::new(text_input("url")),
        InputType::Phone => Arc::new(text_input("tel")),
        InputType::Search => Arc::new(text_input("search")),
        InputType::Numeric => Arc::new(text_input("number")),
        InputType::Hidden => Arc::new(text_input("hidden")),
        InputType::Date => Arc::new(text_input("date")),
        InputType::DateTime => Arc::new(text_input("datetime-local")),
        InputType::Time => Arc::new(text_input("time")),
        InputType::Text => Arc::new(textarea),
        InputType::Boolean => Arc::new(boolean),
        InputType::Select | InputType::TimeZone | InputType::Country => Arc::new(select),
        InputType::Radio => Arc::new(radio),
        InputType::CheckBoxes => Arc::new(check_boxes),
        InputType::Custom(_) => return None,
    };
    Some(renderer)
}

/// `id` and `name` of the control, overridable through `input_html`.
fn control_attrs(field: &Field<'_>) -> Attributes {
    let mut attrs = Attributes::new()
        .with("id", field.control_id.as_str())
        .with("name", field.control_name.as_str());
    attrs.merge(&field.options.input_html);
    attrs
}

fn text_input(
    html_type: &'static str,
) -> impl Fn(&Field<'_>, &FormBuilder<'_>) -> Result<String> + Send + Sync {
    move |field, form| {
        let mut attrs = Attributes::new().with("type", html_type);
        // Passwords are never echoed back.
        if html_type != "password" {
            if let Some(value) = form.value_string(&field.method) {
                attrs.set("value", value);
            }
        }
        if field.required && html_type != "hidden" {
            attrs.set("required", "required");
        }
        attrs.merge(&control_attrs(field));
        Ok(void("input", &attrs)?)
    }
}

fn textarea(field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
    let value = form.value_string(&field.method).unwrap_or_default();
    let mut attrs = control_attrs(field);
    if field.required {
        attrs.set_default("required", "required");
    }
    Ok(element("textarea", &escape(&value)?, &attrs)?)
}

/// A hidden `0` followed by a checkbox `1`, so an unchecked box still
/// submits a value.
fn boolean(field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
    let hidden = void(
        "input",
        &Attributes::new()
            .with("name", field.control_name.as_str())
            .with("type", "hidden")
            .with("value", "0"),
    )?;

    let mut attrs = Attributes::new().with("type", "checkbox").with("value", "1");
    if form.value(&field.method).as_ref().is_some_and(is_truthy) {
        attrs.set("checked", "checked");
    }
    attrs.merge(&control_attrs(field));
    Ok(format!("{}{}", hidden, void("input", &attrs)?))
}

fn select(field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
    let selected = form.value_strings(&field.method);
    let include_blank = !field.is_multiple()
        && field
            .options
            .include_blank
            .unwrap_or(form.config().include_blank_for_select_by_default);

    let mut options = String::new();
    if include_blank {
        options.push_str(&element("option", "", &Attributes::new().with("value", ""))?);
    }
    for choice in choices(field) {
        let mut attrs = Attributes::new().with("value", choice.value.as_str());
        if selected.contains(&choice.value) {
            attrs.set("selected", "selected");
        }
        options.push_str(&element("option", &escape(&choice.label)?, &attrs)?);
    }

    let mut attrs = control_attrs(field);
    if field.is_multiple() {
        attrs.set("multiple", "multiple");
    }
    Ok(element("select", &options, &attrs)?)
}

fn radio(field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
    choice_group(field, form, "radio")
}

fn check_boxes(field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
    choice_group(field, form, "checkbox")
}

/// `<ol class="choices-group">` with one labelled input per choice.
fn choice_group(field: &Field<'_>, form: &FormBuilder<'_>, html_type: &str) -> Result<String> {
    let selected = form.value_strings(&field.method);
    let mut items = String::new();
    for choice in choices(field) {
        let id = format!("{}_{}", field.control_id, sanitize_value(&choice.value));
        let mut attrs = Attributes::new()
            .with("id", id.as_str())
            .with("name", field.control_name.as_str())
            .with("type", html_type)
            .with("value", choice.value.as_str());
        if selected.contains(&choice.value) {
            attrs.set("checked", "checked");
        }
        let inner = format!("{} {}", void("input", &attrs)?, escape(&choice.label)?);
        let label = element("label", &inner, &Attributes::new().with("for", id))?;
        items.push_str(&element("li", &label, &Attributes::new().with("class", "choice"))?);
    }
    Ok(element(
        "ol",
        &items,
        &Attributes::new().with("class", "choices-group"),
    )?)
}

/// The caller's collection; radios without one offer yes/no.
fn choices(field: &Field<'_>) -> Vec<Choice> {
    match &field.options.collection {
        Some(choices) => choices.clone(),
        None if field.input_type == InputType::Radio => {
            vec![Choice::new("Yes", "true"), Choice::new("No", "false")]
        }
        None => Vec::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "yes" | "on"),
        _ => false,
    }
}

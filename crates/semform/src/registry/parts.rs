//! Default label, hint and errors renderers.
//!
//! Installed in the base layer. Each returns an empty string when it has
//! nothing to show, so the part composer drops the part entirely.

use semform_markup::{element, escape, Attributes};

use crate::builder::naming::{humanize, to_sentence};
use crate::builder::{Field, FormBuilder};
use crate::config::InlineErrors;
use crate::error::Result;
use crate::input_type::InputType;

/// `<label for="..">Text<abbr title="required">*</abbr></label>`
pub fn label(field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
    if field.options.hide_label || field.input_type == InputType::Hidden {
        return Ok(String::new());
    }
    let text = field
        .options
        .label
        .clone()
        .unwrap_or_else(|| humanize(field.name));

    let config = form.config();
    let (marker, state) = if field.required {
        (&config.required_marker, "required")
    } else {
        (&config.optional_marker, "optional")
    };

    let mut inner = escape(&text)?;
    if !marker.is_empty() {
        let abbr = element("abbr", &escape(marker)?, &Attributes::new().with("title", state))?;
        inner.push_str(&abbr);
    }
    Ok(element("label", &inner, &field.label_html)?)
}

/// `<p class="inline-hints">..</p>`
pub fn hint(field: &Field<'_>, _form: &FormBuilder<'_>) -> Result<String> {
    match field.options.hint.as_deref() {
        Some(hint) if !hint.is_empty() => Ok(element(
            "p",
            &escape(hint)?,
            &Attributes::new().with("class", "inline-hints"),
        )?),
        _ => Ok(String::new()),
    }
}

/// Inline validation errors, shaped by [`InlineErrors`].
pub fn errors(field: &Field<'_>, form: &FormBuilder<'_>) -> Result<String> {
    if field.errors.is_empty() {
        return Ok(String::new());
    }
    let out = match form.config().inline_errors {
        InlineErrors::Sentence => element(
            "p",
            &escape(&to_sentence(&field.errors))?,
            &Attributes::new().with("class", "inline-errors"),
        )?,
        InlineErrors::List => {
            let mut items = String::new();
            for message in &field.errors {
                items.push_str(&element("li", &escape(message)?, &Attributes::new())?);
            }
            element("ul", &items, &Attributes::new().with("class", "errors"))?
        }
        InlineErrors::First => element(
            "p",
            &escape(&field.errors[0])?,
            &Attributes::new().with("class", "inline-error"),
        )?,
        InlineErrors::None => String::new(),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::options::InputOptions;
    use crate::registry::Registry;
    use crate::schema::{ColumnType, Record};

    fn post() -> Record {
        Record::new("post")
            .required_column("title", ColumnType::String)
            .column("body", ColumnType::Text)
            .error("title", "can't be blank")
            .error("title", "is too short")
    }

    #[test]
    fn test_label_with_required_marker() {
        let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let options = InputOptions::new();
        let out = label(&form.describe("title", &options), &form).unwrap();
        assert_eq!(
            out,
            r#"<label for="post_title">Title<abbr title="required">*</abbr></label>"#
        );
    }

    #[test]
    fn test_optional_label_without_marker() {
        let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let options = InputOptions::new().label("Content & notes");
        let out = label(&form.describe("body", &options), &form).unwrap();
        assert_eq!(out, r#"<label for="post_body">Content &amp; notes</label>"#);
    }

    #[test]
    fn test_hidden_label_is_empty() {
        let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let hidden = InputOptions::new().hide_label();
        assert_eq!(label(&form.describe("body", &hidden), &form).unwrap(), "");
    }

    #[test]
    fn test_hint_only_when_set() {
        let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let none = InputOptions::new();
        assert_eq!(hint(&form.describe("body", &none), &form).unwrap(), "");
        let some = InputOptions::new().hint("Markdown works");
        assert_eq!(
            hint(&form.describe("body", &some), &form).unwrap(),
            r#"<p class="inline-hints">Markdown works</p>"#
        );
    }

    #[test]
    fn test_error_styles() {
        let registry = Registry::default();
        let post = post();
        let options = InputOptions::new();
        let render = |inline_errors| {
            let config = FormConfig {
                inline_errors,
                ..FormConfig::default()
            };
            let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
            errors(&form.describe("title", &options), &form).unwrap()
        };

        assert_eq!(
            render(InlineErrors::Sentence),
            r#"<p class="inline-errors">can&#x27;t be blank and is too short</p>"#
        );
        assert_eq!(
            render(InlineErrors::List),
            r#"<ul class="errors"><li>can&#x27;t be blank</li><li>is too short</li></ul>"#
        );
        assert_eq!(
            render(InlineErrors::First),
            r#"<p class="inline-error">can&#x27;t be blank</p>"#
        );
        assert_eq!(render(InlineErrors::None), "");
    }

    #[test]
    fn test_sentence_joins_three_errors() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let post = Record::new("post")
            .column("body", ColumnType::Text)
            .error("body", "a")
            .error("body", "b")
            .error("body", "c");
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let options = InputOptions::new();
        assert_eq!(
            errors(&form.describe("body", &options), &form).unwrap(),
            r#"<p class="inline-errors">a, b and c</p>"#
        );
    }

    #[test]
    fn test_no_errors_renders_nothing() {
        let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let options = InputOptions::new();
        assert_eq!(errors(&form.describe("body", &options), &form).unwrap(), "");
    }
}

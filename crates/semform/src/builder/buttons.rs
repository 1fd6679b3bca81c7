//! Submit buttons and form-level error summaries.

use semform_markup::{element, escape, void, Attributes};

use super::naming::{dom_id, humanize};
use super::{FormBuilder, GroupArgs};
use crate::error::{FormError, Result};

/// Caller attributes for [`FormBuilder::commit_button`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonOptions {
    /// Attributes for the `<input type="submit">`.
    pub button_html: Attributes,
    /// Attributes for the `<li>` wrapper.
    pub wrapper_html: Attributes,
}

impl ButtonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button_html(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.button_html.set(name, value);
        self
    }

    pub fn wrapper_html(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.wrapper_html.set(name, value);
        self
    }
}

impl FormBuilder<'_> {
    /// `<li class="commit"><input type="submit" ..></li>`
    ///
    /// Without a label, the button reads "Create Post" for a new record,
    /// "Update Post" for a saved one and "Submit Post" without an object.
    pub fn commit_button(&self, label: Option<&str>, options: &ButtonOptions) -> Result<String> {
        let (verb, class) = match self.object {
            None => ("Submit", "submit"),
            Some(object) if object.is_new_record() => ("Create", "create"),
            Some(_) => ("Update", "update"),
        };
        let value = match label {
            Some(label) => label.to_string(),
            None => {
                let model = self
                    .object
                    .map(|o| humanize(o.model_name()))
                    .unwrap_or_else(|| humanize(self.object_name));
                format!("{} {}", verb, model).trim_end().to_string()
            }
        };

        let mut button = Attributes::new()
            .with("id", dom_id(self.object_name, "submit"))
            .with("name", "commit")
            .with("type", "submit")
            .with("value", value);
        button.merge(&options.button_html.without(&["class"]));
        button.set("class", class);
        button.add_classes(options.button_html.class_tokens());

        let mut wrapper = options.wrapper_html.without(&["class"]);
        wrapper.set("class", "commit");
        wrapper.add_classes(options.wrapper_html.class_tokens());

        Ok(element("li", &void("input", &button)?, &wrapper)?)
    }

    /// A `<fieldset class="buttons">`.
    ///
    /// The only button name is `commit`; with no names and no block the
    /// group holds a commit button.
    pub fn buttons(&self, args: GroupArgs<'_>) -> Result<String> {
        if args.is_nested() {
            return Err(FormError::malformed("for", "buttons cannot be nested"));
        }
        if let Some(unknown) = args.field_list().iter().find(|f| *f != "commit") {
            return Err(FormError::malformed(
                "fields",
                format!("unknown button '{}'", unknown),
            ));
        }
        let content = if args.has_block() {
            if !args.field_list().is_empty() {
                return Err(FormError::malformed(
                    "fields",
                    "cannot be combined with a block",
                ));
            }
            self.group_content(&args)?
        } else {
            self.commit_button(None, &ButtonOptions::default())?
        };
        self.fieldset(&args, args.legend(), &content, "buttons")
    }

    /// Base errors, then errors on `fields`, as `<ul class="errors">`.
    ///
    /// Field errors are prefixed with the humanized field name. Returns an
    /// empty string when there is nothing to report.
    pub fn semantic_errors(&self, fields: &[&str]) -> Result<String> {
        let Some(object) = self.object else {
            return Ok(String::new());
        };
        let mut messages = object.base_errors();
        for field in fields {
            let name = humanize(field);
            messages.extend(
                object
                    .errors_on(field)
                    .into_iter()
                    .map(|message| format!("{} {}", name, message)),
            );
        }
        if messages.is_empty() {
            return Ok(String::new());
        }

        let mut items = String::new();
        for message in &messages {
            items.push_str(&element("li", &escape(message)?, &Attributes::new())?);
        }
        Ok(element(
            "ul",
            &items,
            &Attributes::new().with("class", "errors"),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::registry::Registry;
    use crate::schema::Record;

    #[test]
    fn test_create_button_for_new_record() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let post = Record::new("post");
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        assert_eq!(
            form.commit_button(None, &ButtonOptions::new()).unwrap(),
            r#"<li class="commit"><input class="create" id="post_submit" name="commit" type="submit" value="Create Post"></li>"#
        );
    }

    #[test]
    fn test_update_button_for_saved_record() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let post = Record::new("blog_post").persisted(true);
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let out = form.commit_button(None, &ButtonOptions::new()).unwrap();
        assert!(out.contains(r#"value="Update Blog post""#));
        assert!(out.contains(r#"class="update""#));
    }

    #[test]
    fn test_submit_button_without_object() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let form = FormBuilder::new("search", None, &config, &registry).unwrap();
        let out = form
            .commit_button(
                Some("Go"),
                &ButtonOptions::new()
                    .button_html("class", "primary")
                    .wrapper_html("class", "wide"),
            )
            .unwrap();
        assert_eq!(
            out,
            r#"<li class="commit wide"><input class="submit primary" id="search_submit" name="commit" type="submit" value="Go"></li>"#
        );
    }

    #[test]
    fn test_buttons_group() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let post = Record::new("post");
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        let out = form.buttons(GroupArgs::new()).unwrap();
        assert!(out.starts_with(r#"<fieldset class="buttons"><ol><li class="commit">"#));
        assert!(form.buttons(GroupArgs::new().field("commit")).is_ok());
    }

    #[test]
    fn test_unknown_button_is_malformed() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let form = FormBuilder::new("post", None, &config, &registry).unwrap();
        assert!(matches!(
            form.buttons(GroupArgs::new().field("cancel")),
            Err(FormError::MalformedFieldList { .. })
        ));
    }

    #[test]
    fn test_semantic_errors() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let post = Record::new("post")
            .base_error("Post is locked")
            .error("title", "is too short")
            .error("body", "is missing");
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        assert_eq!(
            form.semantic_errors(&["title"]).unwrap(),
            r#"<ul class="errors"><li>Post is locked</li><li>Title is too short</li></ul>"#
        );
    }

    #[test]
    fn test_semantic_errors_empty() {
        let (config, registry) = (FormConfig::default(), Registry::default());
        let post = Record::new("post");
        let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
        assert_eq!(form.semantic_errors(&["title"]).unwrap(), "");
    }
}

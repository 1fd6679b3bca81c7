//! Fieldset composition.

use std::fmt;

use log::debug;
use semform_markup::{element, escape, Attributes};

use super::FormBuilder;
use crate::error::{FormError, Result};
use crate::options::InputOptions;
use crate::schema::{AssociationKind, FormObject};

/// Option keys that configure the group itself and never become
/// `<fieldset>` attributes.
const RESERVED_HTML: &[&str] = &["name", "title", "for", "parent", "builder"];

/// Associations included when a group infers its fields.
const INFERRED_ASSOCIATIONS: &[AssociationKind] = &[
    AssociationKind::BelongsTo,
    AssociationKind::HasMany,
    AssociationKind::HasAndBelongsToMany,
];

/// Renders a group's content for one builder.
pub type Block<'a> = Box<dyn Fn(&FormBuilder<'_>) -> Result<String> + 'a>;

/// A positional group argument: a leading title, then field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupArg {
    Title(String),
    Field(String),
}

impl GroupArg {
    pub fn title(title: impl Into<String>) -> Self {
        GroupArg::Title(title.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        GroupArg::Field(name.into())
    }
}

/// An association to render one group per sub-object for.
pub struct NestedTarget<'a> {
    association: String,
    objects: Option<Vec<&'a dyn FormObject>>,
}

impl<'a> NestedTarget<'a> {
    /// Sub-objects are read from the bound object.
    pub fn new(association: impl Into<String>) -> Self {
        Self {
            association: association.into(),
            objects: None,
        }
    }

    /// Renders these sub-objects instead of the bound object's.
    pub fn objects<I>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn FormObject>,
    {
        self.objects = Some(objects.into_iter().collect());
        self
    }

    pub fn association(&self) -> &str {
        &self.association
    }
}

impl fmt::Debug for NestedTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedTarget")
            .field("association", &self.association)
            .field("objects", &self.objects.as_ref().map(Vec::len))
            .finish()
    }
}

/// Arguments of [`FormBuilder::inputs`] and [`FormBuilder::buttons`].
///
/// ```rust
/// use semform::{GroupArg, GroupArgs};
///
/// let args = GroupArgs::parse([GroupArg::title("Advanced"), GroupArg::field("created_at")])
///     .unwrap()
///     .html("class", "advanced");
/// assert_eq!(args.field_list(), ["created_at"]);
///
/// assert!(GroupArgs::parse([GroupArg::field("a"), GroupArg::title("late")]).is_err());
/// ```
#[derive(Default)]
pub struct GroupArgs<'a> {
    title: Option<String>,
    fields: Vec<String>,
    html: Attributes,
    nested: Option<NestedTarget<'a>>,
    block: Option<Block<'a>>,
}

impl<'a> GroupArgs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds arguments from positional values.
    ///
    /// # Errors
    ///
    /// [`FormError::MalformedFieldList`] naming `title` if a title follows
    /// a field or appears twice.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = GroupArg>,
    {
        let mut group = Self::new();
        for arg in args {
            match arg {
                GroupArg::Title(_) if !group.fields.is_empty() => {
                    return Err(FormError::malformed("title", "must come before the fields"));
                }
                GroupArg::Title(_) if group.title.is_some() => {
                    return Err(FormError::malformed("title", "given more than once"));
                }
                GroupArg::Title(title) => group.title = Some(title),
                GroupArg::Field(name) => group.fields.push(name),
            }
        }
        Ok(group)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets a `<fieldset>` attribute. `name` and `title` set the legend.
    pub fn html(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.html.set(name, value);
        self
    }

    /// Renders one group per sub-object of an association.
    pub fn nested(mut self, target: NestedTarget<'a>) -> Self {
        self.nested = Some(target);
        self
    }

    /// Renders the group's content with `block` instead of a field list.
    ///
    /// For nested groups the block runs once per sub-object, with the
    /// sub-object's builder.
    pub fn block<F>(mut self, block: F) -> Self
    where
        F: Fn(&FormBuilder<'_>) -> Result<String> + 'a,
    {
        self.block = Some(Box::new(block));
        self
    }

    pub fn field_list(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn has_block(&self) -> bool {
        self.block.is_some()
    }

    pub(crate) fn is_nested(&self) -> bool {
        self.nested.is_some()
    }

    /// Legend text: the explicit title, else the `title` or `name` html key.
    pub(crate) fn legend(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or_else(|| self.html.get("title"))
            .or_else(|| self.html.get("name"))
    }

    fn check(&self) -> Result<()> {
        if self.block.is_some() && !self.fields.is_empty() {
            return Err(FormError::malformed(
                "fields",
                "cannot be combined with a block",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for GroupArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupArgs")
            .field("title", &self.title)
            .field("fields", &self.fields)
            .field("html", &self.html)
            .field("nested", &self.nested)
            .field("block", &self.block.is_some())
            .finish()
    }
}

impl<'a> FormBuilder<'a> {
    /// Renders a `<fieldset>` of fields.
    ///
    /// Content comes from the first branch that applies:
    ///
    /// 1. [`GroupArgs::nested`]: one fieldset per sub-object, each rendered
    ///    by a child builder with the same title, fields and block
    /// 2. [`GroupArgs::block`]: the block's output
    /// 3. explicit fields, in order
    /// 4. fields inferred from the bound object's schema
    ///
    /// # Errors
    ///
    /// - [`FormError::MalformedFieldList`] for a block combined with
    ///   fields, or several sub-objects for a single association
    /// - [`FormError::UnknownAssociation`] if the nested target is not an
    ///   association of the bound object
    /// - [`FormError::NestingTooDeep`] past
    ///   [`FormConfig::max_nesting_depth`](crate::FormConfig::max_nesting_depth)
    pub fn inputs(&self, args: GroupArgs<'_>) -> Result<String> {
        args.check()?;
        match &args.nested {
            Some(target) => self.nested_groups(&args, target),
            None => {
                let content = self.group_content(&args)?;
                self.fieldset(&args, args.legend(), &content, &self.config.default_group_class)
            }
        }
    }

    fn nested_groups(&self, args: &GroupArgs<'_>, target: &NestedTarget<'_>) -> Result<String> {
        let depth = self.depth + 1;
        if depth > self.config.max_nesting_depth {
            return Err(FormError::NestingTooDeep {
                depth,
                limit: self.config.max_nesting_depth,
            });
        }

        let association = target.association.as_str();
        let kind = self.object.and_then(|o| o.association(association));
        let objects: Vec<&dyn FormObject> = match (self.object, kind, &target.objects) {
            (Some(_), None, _) | (None, _, None) => {
                return Err(FormError::UnknownAssociation {
                    name: association.to_string(),
                    model: self
                        .object
                        .map(|o| o.model_name().to_string())
                        .unwrap_or_else(|| self.object_name.to_string()),
                });
            }
            (_, _, Some(objects)) => objects.clone(),
            (Some(object), Some(_), None) => object.nested_objects(association),
        };

        let collection = kind.map_or(objects.len() > 1, AssociationKind::is_collection);
        if !collection && objects.len() > 1 {
            return Err(FormError::malformed(
                "for",
                format!(
                    "'{}' is a single association but {} objects were given",
                    association,
                    objects.len()
                ),
            ));
        }

        let base = if self.object_name.is_empty() {
            format!("{}_attributes", association)
        } else {
            format!("{}[{}_attributes]", self.object_name, association)
        };
        debug!(
            "nesting {} {} object(s) under '{}' at depth {}",
            objects.len(),
            association,
            base,
            depth
        );

        let mut out = String::new();
        for (index, object) in objects.into_iter().enumerate() {
            let object_name = if collection {
                format!("{}[{}]", base, index)
            } else {
                base.clone()
            };
            let child = self.child(&object_name, object);
            let legend = args
                .legend()
                .map(|title| title.replace("%i", &(index + 1).to_string()));
            let content = child.group_content(args)?;
            out.push_str(&child.fieldset(
                args,
                legend.as_deref(),
                &content,
                &self.config.default_group_class,
            )?);
        }
        Ok(out)
    }

    /// Content of a non-nested group: the block, the explicit fields or the
    /// inferred fields.
    pub(crate) fn group_content(&self, args: &GroupArgs<'_>) -> Result<String> {
        if let Some(block) = &args.block {
            return block(self);
        }
        let fields = if args.fields.is_empty() {
            self.inferred_fields()
        } else {
            args.fields.clone()
        };
        let options = InputOptions::default();
        let mut content = String::new();
        for field in &fields {
            content.push_str(&self.input(field, &options)?);
        }
        Ok(content)
    }

    /// Associations, then content columns, minus reserved columns.
    fn inferred_fields(&self) -> Vec<String> {
        let Some(object) = self.object else {
            return Vec::new();
        };
        let mut fields = object.associations(INFERRED_ASSOCIATIONS);
        match object.content_columns() {
            Ok(columns) => fields.extend(columns),
            Err(err) => debug!("inferring associations only: {}", err),
        }
        fields.retain(|f| !f.is_empty() && !self.config.is_reserved(f));
        debug!("inferred fields for '{}': {}", self.object_name, fields.join(", "));
        fields
    }

    /// `<fieldset>[<legend><span>title</span></legend>]<ol>content</ol></fieldset>`
    pub(crate) fn fieldset(
        &self,
        args: &GroupArgs<'_>,
        legend: Option<&str>,
        content: &str,
        default_class: &str,
    ) -> Result<String> {
        let mut attrs = args.html.without(RESERVED_HTML);
        if !attrs.contains("class") {
            attrs.set("class", default_class);
        }

        let mut inner = String::new();
        if let Some(title) = legend.filter(|t| !t.is_empty()) {
            let span = element("span", &escape(title)?, &Attributes::new())?;
            inner.push_str(&element("legend", &span, &Attributes::new())?);
        }
        inner.push_str(&element("ol", content, &Attributes::new())?);
        Ok(element("fieldset", &inner, &attrs)?)
    }
}

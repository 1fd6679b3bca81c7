//! Group composition: inferred, explicit, block and nested branches.

use semform::{
    AssociationKind, ColumnType, FormBuilder, FormConfig, FormError, FormObject, GroupArg,
    GroupArgs, InputOptions, NestedTarget, Record, Registry, Schema, SchemaUnavailable,
};

fn post() -> Record {
    Record::new("post")
        .column("id", ColumnType::Integer)
        .column("title", ColumnType::String)
        .column("body", ColumnType::Text)
        .column("author_id", ColumnType::Integer)
        .column("created_at", ColumnType::Datetime)
        .column("updated_at", ColumnType::Datetime)
        .column("lock_version", ColumnType::Integer)
        .associate("author", AssociationKind::BelongsTo)
        .nested(
            "comments",
            AssociationKind::HasMany,
            vec![
                Record::new("comment")
                    .column("body", ColumnType::Text)
                    .with_value("body", "First"),
                Record::new("comment")
                    .column("body", ColumnType::Text)
                    .with_value("body", "Second"),
            ],
        )
}

/// Wrapper ids of the rendered units, in order.
fn unit_ids(html: &str) -> Vec<&str> {
    html.match_indices("<li class=\"")
        .filter_map(|(i, _)| {
            let rest = &html[i..];
            let start = rest.find(" id=\"")? + 5;
            let end = rest[start..].find('"')?;
            Some(&rest[start..start + end])
        })
        .collect()
}

#[test]
fn inferred_group_lists_associations_then_columns() {
    let post = Record::new("post")
        .column("title", ColumnType::String)
        .column("body", ColumnType::Text)
        .associate("author", AssociationKind::BelongsTo);
    let (config, registry) = (FormConfig::default(), Registry::default());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let out = form.inputs(GroupArgs::new()).unwrap();
    assert_eq!(
        unit_ids(&out),
        vec!["post_author_input", "post_title_input", "post_body_input"]
    );
}

#[test]
fn inferred_group_includes_collections_and_skips_reserved() {
    let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let out = form.inputs(GroupArgs::new()).unwrap();
    assert_eq!(
        unit_ids(&out),
        vec![
            "post_author_input",
            "post_comments_input",
            "post_title_input",
            "post_body_input"
        ]
    );
    assert!(out.contains(r#"name="post[comment_ids][]""#));
}

#[test]
fn titled_group_with_reserved_column() {
    let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let args = GroupArgs::parse([GroupArg::title("Advanced"), GroupArg::field("created_at")]).unwrap();
    let out = form.inputs(args).unwrap();
    assert!(out.starts_with(
        r#"<fieldset class="inputs"><legend><span>Advanced</span></legend><ol><li class="datetime optional" id="post_created_at_input">"#
    ));
    assert_eq!(unit_ids(&out), vec!["post_created_at_input"]);
    assert!(out.ends_with("</li></ol></fieldset>"));
}

#[test]
fn group_class_comes_from_config() {
    let config = FormConfig::from_yaml("default_group_class: fields").unwrap();
    let (registry, post) = (Registry::default(), post());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let out = form.inputs(GroupArgs::new().field("title")).unwrap();
    assert!(out.starts_with(r#"<fieldset class="fields">"#));

    let out = form
        .inputs(GroupArgs::new().field("title").html("class", "main"))
        .unwrap();
    assert!(out.starts_with(r#"<fieldset class="main">"#));
}

#[test]
fn nested_collection_numbers_titles_and_names() {
    let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let out = form
        .inputs(
            GroupArgs::new()
                .title("Comment %i")
                .field("body")
                .nested(NestedTarget::new("comments")),
        )
        .unwrap();

    assert_eq!(out.matches("<fieldset").count(), 2);
    assert!(out.contains("<legend><span>Comment 1</span></legend>"));
    assert!(out.contains("<legend><span>Comment 2</span></legend>"));
    assert!(out.contains(r#"name="post[comments_attributes][0][body]">First</textarea>"#));
    assert!(out.contains(r#"name="post[comments_attributes][1][body]">Second</textarea>"#));
    assert_eq!(
        unit_ids(&out),
        vec![
            "post_comments_attributes_0_body_input",
            "post_comments_attributes_1_body_input"
        ]
    );
}

#[test]
fn nested_block_runs_per_sub_object() {
    let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let options = InputOptions::new().label("Comment");
    let out = form
        .inputs(
            GroupArgs::new()
                .nested(NestedTarget::new("comments"))
                .block(|child| {
                    assert_eq!(child.depth(), 1);
                    child.input("body", &options)
                }),
        )
        .unwrap();
    assert_eq!(out.matches(">Comment</label>").count(), 2);
    assert!(out.contains(r#"for="post_comments_attributes_1_body""#));
}

#[test]
fn nested_with_explicit_objects() {
    let replacement = Record::new("comment")
        .column("body", ColumnType::Text)
        .with_value("body", "Draft");
    let (config, registry, post) = (FormConfig::default(), Registry::default(), post());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let target = NestedTarget::new("comments").objects([&replacement as &dyn FormObject]);
    let out = form.inputs(GroupArgs::new().nested(target)).unwrap();
    assert!(out.contains(">Draft</textarea>"));
    assert!(!out.contains("First"));
    assert!(out.contains("post[comments_attributes][0][body]"));
}

#[test]
fn empty_association_renders_nothing() {
    let post = Record::new("post").nested("comments", AssociationKind::HasMany, Vec::new());
    let (config, registry) = (FormConfig::default(), Registry::default());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();
    let out = form
        .inputs(GroupArgs::new().nested(NestedTarget::new("comments")))
        .unwrap();
    assert_eq!(out, "");
}

#[test]
fn nested_without_object_is_unknown_association() {
    let (config, registry) = (FormConfig::default(), Registry::default());
    let form = FormBuilder::new("post", None, &config, &registry).unwrap();
    let err = form
        .inputs(GroupArgs::new().nested(NestedTarget::new("comments")))
        .unwrap_err();
    assert!(matches!(err, FormError::UnknownAssociation { .. }));
}

#[test]
fn title_after_field_is_malformed() {
    let err = GroupArgs::parse([GroupArg::field("title"), GroupArg::title("Late")]).unwrap_err();
    assert!(err.to_string().contains("'title'"));
}

/// A node whose `parent` association points back at itself.
struct Node;

impl Schema for Node {
    fn column_type(&self, field: &str) -> Result<Option<ColumnType>, SchemaUnavailable> {
        Ok((field == "label").then_some(ColumnType::String))
    }

    fn is_required(&self, _field: &str) -> Option<bool> {
        None
    }

    fn association(&self, field: &str) -> Option<AssociationKind> {
        (field == "parent").then_some(AssociationKind::HasOne)
    }

    fn associations(&self, _kinds: &[AssociationKind]) -> Vec<String> {
        Vec::new()
    }

    fn content_columns(&self) -> Result<Vec<String>, SchemaUnavailable> {
        Ok(vec!["label".to_string()])
    }
}

impl FormObject for Node {
    fn model_name(&self) -> &str {
        "node"
    }

    fn value(&self, _field: &str) -> Option<serde_json::Value> {
        None
    }

    fn errors_on(&self, _field: &str) -> Vec<String> {
        Vec::new()
    }

    fn nested_objects(&self, association: &str) -> Vec<&dyn FormObject> {
        if association == "parent" {
            vec![self as &dyn FormObject]
        } else {
            Vec::new()
        }
    }
}

fn ancestors(form: &FormBuilder<'_>) -> semform::Result<String> {
    form.inputs(
        GroupArgs::new()
            .nested(NestedTarget::new("parent"))
            .block(ancestors),
    )
}

#[test]
fn cyclic_graph_hits_depth_guard() {
    let config = FormConfig::from_yaml("max_nesting_depth: 3").unwrap();
    let registry = Registry::default();
    let node = Node;
    let form = FormBuilder::for_object(&node, &config, &registry).unwrap();
    match ancestors(&form) {
        Err(FormError::NestingTooDeep { depth, limit }) => {
            assert_eq!(depth, 4);
            assert_eq!(limit, 3);
        }
        other => panic!("expected NestingTooDeep, got {other:?}"),
    }
}

#[test]
fn bounded_nesting_renders() {
    let (config, registry) = (FormConfig::default(), Registry::default());
    let node = Node;
    let form = FormBuilder::for_object(&node, &config, &registry).unwrap();
    let out = form
        .inputs(GroupArgs::new().nested(NestedTarget::new("parent")))
        .unwrap();
    assert_eq!(unit_ids(&out), vec!["node_parent_attributes_label_input"]);
}

#[test]
fn buttons_and_errors_around_a_group() {
    let post = Record::new("post")
        .column("title", ColumnType::String)
        .base_error("Post could not be saved")
        .error("title", "is too long")
        .persisted(true);
    let (config, registry) = (FormConfig::default(), Registry::default());
    let form = FormBuilder::for_object(&post, &config, &registry).unwrap();

    let errors = form.semantic_errors(&["title"]).unwrap();
    assert!(errors.contains("<li>Title is too long</li>"));

    let buttons = form.buttons(GroupArgs::new()).unwrap();
    assert!(buttons.contains(r#"value="Update Post""#));
}

//! DOM ids, input names and display text derived from field names.

use crate::schema::AssociationKind;

/// Turns an object name such as `post[comments_attributes][0]` into an id
/// prefix (`post_comments_attributes_0`).
pub fn sanitize_object_name(object_name: &str) -> String {
    let mut out: String = object_name
        .replace("][", "_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.ends_with('_') {
        out.pop();
    }
    out
}

/// `{object}_{suffix}`, or just the suffix without an object name.
pub fn dom_id(object_name: &str, suffix: &str) -> String {
    let prefix = sanitize_object_name(object_name);
    if prefix.is_empty() {
        suffix.to_string()
    } else {
        format!("{}_{}", prefix, suffix)
    }
}

/// `{object}[{method}]`, or just the method without an object name.
pub fn input_name(object_name: &str, method: &str) -> String {
    if object_name.is_empty() {
        method.to_string()
    } else {
        format!("{}[{}]", object_name, method)
    }
}

/// The attribute a control actually submits for a field.
///
/// Single references submit their foreign key (`author` → `author_id`),
/// collections submit a list of keys (`tags` → `tag_ids`).
pub fn control_method(field: &str, association: Option<AssociationKind>) -> String {
    match association {
        Some(AssociationKind::BelongsTo) => format!("{}_id", field),
        Some(kind) if kind.is_collection() => format!("{}_ids", singularize(field)),
        _ => field.to_string(),
    }
}

/// Display text for a field name: `created_at` → `Created at`,
/// `author_id` → `Author`.
pub fn humanize(field: &str) -> String {
    let base = field.strip_suffix("_id").unwrap_or(field);
    let spaced = base.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A small English singularizer for association names.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = word.strip_suffix("sses") {
        format!("{}ss", stem)
    } else if word.ends_with("ss") {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// Joins items as an English list: `a`, `a and b`, `a, b and c`.
pub fn to_sentence(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Id-safe form of a choice value, used to suffix radio and checkbox ids.
pub fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

//! Ordered HTML attribute sets.
//!
//! [`Attributes`] keeps keys sorted so that rendered markup is stable across
//! runs, which the form builder relies on for idempotent output.

use std::collections::BTreeMap;

/// A set of HTML attributes with class-list aware merging.
///
/// # Example
///
/// ```rust
/// use semform_markup::Attributes;
///
/// let mut attrs = Attributes::new().with("id", "post_title").with("class", "wide");
/// attrs.add_classes(["string", "wide", "required"]);
/// assert_eq!(attrs.get("class"), Some("wide string required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: BTreeMap<String, String>,
}

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Sets an attribute only if it is not already present.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Returns the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns `true` if the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Returns the whitespace-separated tokens of the `class` attribute.
    pub fn class_tokens(&self) -> Vec<&str> {
        self.get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Appends classes after the existing ones, dropping duplicates.
    ///
    /// The first occurrence of a class keeps its position.
    pub fn add_classes<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens: Vec<String> = self.class_tokens().into_iter().map(String::from).collect();
        tokens.extend(classes.into_iter().map(|c| c.as_ref().to_string()));
        let merged = class_list(tokens.iter().map(String::as_str));
        if merged.is_empty() {
            self.entries.remove("class");
        } else {
            self.entries.insert("class".to_string(), merged);
        }
    }

    /// Copies every attribute from `other`, which wins on conflicts.
    pub fn merge(&mut self, other: &Attributes) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    /// Returns a copy without the given keys.
    pub fn without(&self, names: &[&str]) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(name, _)| !names.contains(&name.as_str()))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }

    /// Iterates attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Joins class names with single spaces, dropping blanks and duplicates.
///
/// Order of first occurrence is preserved. Each entry may itself contain
/// several whitespace-separated classes.
pub fn class_list<'a, I>(classes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    for token in classes.into_iter().flat_map(str::split_whitespace) {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_default_keeps_existing() {
        let mut attrs = Attributes::new().with("for", "custom");
        attrs.set_default("for", "post_title");
        assert_eq!(attrs.get("for"), Some("custom"));

        attrs.set_default("id", "x");
        assert_eq!(attrs.get("id"), Some("x"));
    }

    #[test]
    fn test_class_list_dedupes_in_order() {
        assert_eq!(
            class_list(["string", "required", "string", "  wide extra ", "wide"]),
            "string required wide extra"
        );
    }

    #[test]
    fn test_class_list_empty() {
        assert_eq!(class_list(["", "  "]), "");
    }

    #[test]
    fn test_add_classes_removes_empty_class() {
        let mut attrs = Attributes::new().with("class", " ");
        attrs.add_classes(Vec::<String>::new());
        assert!(!attrs.contains("class"));
    }

    #[test]
    fn test_without_drops_keys() {
        let attrs = Attributes::new()
            .with("name", "Title")
            .with("class", "inputs")
            .with("for", "author");
        let filtered = attrs.without(&["name", "for"]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get("class"), Some("inputs"));
    }

    #[test]
    fn test_merge_other_wins() {
        let mut a = Attributes::new().with("id", "a").with("size", "10");
        a.merge(&Attributes::new().with("id", "b"));
        assert_eq!(a.get("id"), Some("b"));
        assert_eq!(a.get("size"), Some("10"));
    }

    #[test]
    fn test_iter_is_sorted() {
        let attrs: Attributes = [("type", "text"), ("id", "x"), ("class", "c")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["class", "id", "type"]);
    }
}

//! Schema annotations
//!
//! Schema documents carry persistence metadata as `x-` extension keys with
//! arbitrary JSON values. This module stores them as a tagged
//! [`AnnotationValue`] and exposes one typed accessor per known key, so a
//! malformed value degrades to the accessor's documented default instead of
//! leaking dynamic typing into the resolution engine.

use indexmap::IndexMap;
use jpagen_core::RelationKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// Annotation keys
// ============================================================================

/// Exact annotation keys consumed by the generator
pub mod keys {
    /// Persistence kind of a definition (`Entity`, `Embeddable`, ...)
    pub const PERSIST: &str = "x-persist";
    /// Superclass, optionally fully qualified
    pub const EXTENDS: &str = "x-extends";
    /// Table name override
    pub const TABLE: &str = "x-table";
    /// Field-level uniqueness marker, or table-level list of column groups
    pub const UNIQUE: &str = "x-unique";
    /// Column name override
    pub const COLUMN_NAME: &str = "x-column-name";
    /// Relation kind label
    pub const RELATION: &str = "x-rel";
    /// Back-reference field name of a one-to-many relation
    pub const MAPPED_BY: &str = "x-mapped-by";
    /// Excludes a field from generation when `true`
    pub const IGNORE: &str = "x-ignore";

    /// Prefix shared by every extension key
    pub const EXTENSION_PREFIX: &str = "x-";
}

// ============================================================================
// AnnotationValue
// ============================================================================

/// A single annotation value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Text(String),
    List(Vec<AnnotationValue>),
    /// Objects and nulls; kept so that key presence is still observable
    Opaque,
}

impl AnnotationValue {
    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnnotationValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// List content, if this is a list value
    pub fn as_list(&self) -> Option<&[AnnotationValue]> {
        match self {
            AnnotationValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Scalar rendering used inside string lists; lists and opaque values have none
    fn scalar_text(&self) -> Option<String> {
        match self {
            AnnotationValue::Text(text) => Some(text.clone()),
            AnnotationValue::Bool(flag) => Some(flag.to_string()),
            AnnotationValue::List(_) | AnnotationValue::Opaque => None,
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::Text(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::Text(value)
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}

impl From<serde_json::Value> for AnnotationValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Bool(flag) => AnnotationValue::Bool(flag),
            Value::String(text) => AnnotationValue::Text(text),
            Value::Number(number) => AnnotationValue::Text(number.to_string()),
            Value::Array(items) => {
                AnnotationValue::List(items.into_iter().map(AnnotationValue::from).collect())
            }
            Value::Object(_) | Value::Null => AnnotationValue::Opaque,
        }
    }
}

// ============================================================================
// Annotations
// ============================================================================

/// Ordered annotation map attached to a definition or a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(IndexMap<String, AnnotationValue>);

impl Annotations {
    /// Create an empty annotation map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an annotation
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.0.get(key)
    }

    /// Whether a key is present, whatever its value
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnnotationValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Text value for a key; non-text values read as absent
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AnnotationValue::as_text)
    }

    /// Copy every key missing here from `fallback`
    pub fn merged_over(&self, fallback: &Annotations) -> Annotations {
        let mut merged = self.clone();
        for (key, value) in fallback.iter() {
            if !merged.contains(key) {
                merged.insert(key, value.clone());
            }
        }
        merged
    }

    // ========================================================================
    // Definition-level accessors
    // ========================================================================

    /// Persistence kind marker. `None` marks a non-persistable definition;
    /// a blank string is still persistable.
    pub fn persistence_kind(&self) -> Option<&str> {
        self.text(keys::PERSIST)
    }

    /// Superclass value, ignoring blanks
    pub fn extends(&self) -> Option<&str> {
        self.text(keys::EXTENDS).filter(|s| !s.trim().is_empty())
    }

    pub fn table_name(&self) -> Option<&str> {
        self.text(keys::TABLE)
    }

    /// Table-level unique column groups.
    ///
    /// Only list members of the outer list count as groups; anything else is
    /// dropped. Inside a group, text and boolean members become column names
    /// and nested lists or opaque members are dropped.
    pub fn unique_groups(&self) -> Vec<Vec<String>> {
        let Some(groups) = self.get(keys::UNIQUE).and_then(AnnotationValue::as_list) else {
            return Vec::new();
        };

        groups
            .iter()
            .filter_map(AnnotationValue::as_list)
            .map(|group| group.iter().filter_map(AnnotationValue::scalar_text).collect())
            .collect()
    }

    // ========================================================================
    // Field-level accessors
    // ========================================================================

    /// Field-level uniqueness: the key's presence is enough
    pub fn is_unique(&self) -> bool {
        self.contains(keys::UNIQUE)
    }

    pub fn column_name(&self) -> Option<&str> {
        self.text(keys::COLUMN_NAME)
    }

    /// Declared relation kind; unknown labels read as none
    pub fn relation(&self) -> Option<RelationKind> {
        self.text(keys::RELATION).and_then(RelationKind::from_label)
    }

    /// Write a relation label
    pub fn set_relation(&mut self, kind: RelationKind) {
        self.insert(keys::RELATION, kind.label());
    }

    pub fn mapped_by(&self) -> Option<&str> {
        self.text(keys::MAPPED_BY)
    }

    /// Only a boolean `true` ignores a field
    pub fn is_ignored(&self) -> bool {
        self.get(keys::IGNORE).and_then(AnnotationValue::as_bool) == Some(true)
    }
}

impl FromIterator<(String, AnnotationValue)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (String, AnnotationValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_value() {
        assert_eq!(AnnotationValue::from(json!(true)), AnnotationValue::Bool(true));
        assert_eq!(
            AnnotationValue::from(json!("Entity")),
            AnnotationValue::Text("Entity".into())
        );
        assert_eq!(
            AnnotationValue::from(json!(42)),
            AnnotationValue::Text("42".into())
        );
        assert_eq!(AnnotationValue::from(json!(null)), AnnotationValue::Opaque);
        assert_eq!(AnnotationValue::from(json!({"a": 1})), AnnotationValue::Opaque);
        assert_eq!(
            AnnotationValue::from(json!(["a", ["b"]])),
            AnnotationValue::List(vec![
                AnnotationValue::Text("a".into()),
                AnnotationValue::List(vec![AnnotationValue::Text("b".into())]),
            ])
        );
    }

    #[test]
    fn test_ignore_requires_boolean_true() {
        let ann = Annotations::new().with(keys::IGNORE, true);
        assert!(ann.is_ignored());

        let ann = Annotations::new().with(keys::IGNORE, false);
        assert!(!ann.is_ignored());

        let ann = Annotations::new().with(keys::IGNORE, "true");
        assert!(!ann.is_ignored());

        assert!(!Annotations::new().is_ignored());
    }

    #[test]
    fn test_unique_presence_is_enough() {
        assert!(Annotations::new().with(keys::UNIQUE, true).is_unique());
        assert!(Annotations::new().with(keys::UNIQUE, false).is_unique());
        assert!(Annotations::new().with(keys::UNIQUE, "yes").is_unique());
        assert!(!Annotations::new().is_unique());
    }

    #[test]
    fn test_unique_groups_drop_malformed_entries() {
        let value = AnnotationValue::from(json!([
            ["first_name", "last_name"],
            "email",
            [],
            ["code", ["nested"], 7, null],
            {"columns": ["x"]}
        ]));
        let ann = Annotations::new().with(keys::UNIQUE, value);

        assert_eq!(
            ann.unique_groups(),
            vec![
                vec!["first_name".to_string(), "last_name".to_string()],
                vec![],
                vec!["code".to_string(), "7".to_string()],
            ]
        );
    }

    #[test]
    fn test_unique_groups_non_list_value() {
        let ann = Annotations::new().with(keys::UNIQUE, true);
        assert!(ann.unique_groups().is_empty());
        assert!(Annotations::new().unique_groups().is_empty());
    }

    #[test]
    fn test_persistence_kind_requires_text() {
        let ann = Annotations::new().with(keys::PERSIST, "");
        assert_eq!(ann.persistence_kind(), Some(""));

        let ann = Annotations::new().with(keys::PERSIST, true);
        assert_eq!(ann.persistence_kind(), None);
    }

    #[test]
    fn test_extends_ignores_blank() {
        assert_eq!(
            Annotations::new()
                .with(keys::EXTENDS, "com.acme.Base")
                .extends(),
            Some("com.acme.Base")
        );
        assert_eq!(Annotations::new().with(keys::EXTENDS, "  ").extends(), None);
    }

    #[test]
    fn test_relation_accessors() {
        let mut ann = Annotations::new().with(keys::RELATION, "one-to-many");
        assert_eq!(ann.relation(), Some(RelationKind::OneToMany));

        ann.set_relation(RelationKind::ManyToOne);
        assert_eq!(ann.relation(), Some(RelationKind::ManyToOne));
        assert_eq!(ann.text(keys::RELATION), Some("many-to-one"));

        let ann = Annotations::new().with(keys::RELATION, "sideways");
        assert_eq!(ann.relation(), None);
    }

    #[test]
    fn test_merged_over_prefers_own_keys() {
        let own = Annotations::new().with(keys::TABLE, "people");
        let fallback = Annotations::new()
            .with(keys::TABLE, "persons")
            .with(keys::PERSIST, "Entity");

        let merged = own.merged_over(&fallback);
        assert_eq!(merged.table_name(), Some("people"));
        assert_eq!(merged.persistence_kind(), Some("Entity"));
        assert_eq!(merged.len(), 2);
    }
}

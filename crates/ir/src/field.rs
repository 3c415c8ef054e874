//! Field definitions for schema records
//!
//! A [`Field`] is one property of a definition: its declared value kind
//! (scalar, reference, or array) plus its annotation map.

use crate::annotation::Annotations;
use jpagen_core::ScalarType;
use serde::{Deserialize, Serialize};

/// Prefix of references into the document's schema components
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

// ============================================================================
// RefPath
// ============================================================================

/// Full reference path to a definition, e.g. `#/components/schemas/Author`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefPath(String);

impl RefPath {
    /// Wrap a reference string exactly as written in the document
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Canonical path of a component schema
    pub fn component(name: &str) -> Self {
        Self(format!("{SCHEMA_REF_PREFIX}{name}"))
    }

    /// Definition name: the segment after the last `/`
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// FieldKind
// ============================================================================

/// Primitive type as written in the schema (`type` and `format`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: Option<String>,
    pub format: Option<String>,
}

impl Primitive {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Resolve to the scalar type system
    pub fn scalar(&self) -> ScalarType {
        ScalarType::from_schema(self.kind.as_deref(), self.format.as_deref())
    }
}

/// Element of an array-valued field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArrayItem {
    Reference(RefPath),
    Primitive(Primitive),
}

/// Declared value kind of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldKind {
    Primitive(Primitive),
    Reference(RefPath),
    Array(ArrayItem),
}

// ============================================================================
// Field
// ============================================================================

/// A typed, annotated member of a definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Declared value kind
    pub kind: FieldKind,

    /// `x-` annotations on the property
    #[serde(default)]
    pub annotations: Annotations,
}

impl Field {
    /// Create a field of the given kind with no annotations
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            annotations: Annotations::new(),
        }
    }

    /// Scalar field of the given schema type
    pub fn primitive(kind: impl Into<String>) -> Self {
        Self::new(FieldKind::Primitive(Primitive::new(kind)))
    }

    /// Direct reference to a component schema
    pub fn reference(target: &str) -> Self {
        Self::new(FieldKind::Reference(RefPath::component(target)))
    }

    /// Array of references to a component schema
    pub fn array_of(target: &str) -> Self {
        Self::new(FieldKind::Array(ArrayItem::Reference(RefPath::component(
            target,
        ))))
    }

    /// Array of scalar values
    pub fn array_of_primitive(kind: impl Into<String>) -> Self {
        Self::new(FieldKind::Array(ArrayItem::Primitive(Primitive::new(kind))))
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add an annotation
    pub fn annotated(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::annotation::AnnotationValue>,
    ) -> Self {
        self.annotations.insert(key, value);
        self
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Reference target of a direct reference field
    pub fn reference_target(&self) -> Option<&RefPath> {
        match &self.kind {
            FieldKind::Reference(path) => Some(path),
            _ => None,
        }
    }

    /// Reference target of an array-of-reference field's items
    pub fn item_reference(&self) -> Option<&RefPath> {
        match &self.kind {
            FieldKind::Array(ArrayItem::Reference(path)) => Some(path),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, FieldKind::Array(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::keys;

    #[test]
    fn test_ref_path_name() {
        let path = RefPath::component("Author");
        assert_eq!(path.as_str(), "#/components/schemas/Author");
        assert_eq!(path.name(), "Author");

        assert_eq!(RefPath::new("Author").name(), "Author");
        assert_eq!(RefPath::new("other.json#/defs/Book").name(), "Book");
    }

    #[test]
    fn test_reference_accessors() {
        let field = Field::reference("Author");
        assert_eq!(field.reference_target(), Some(&RefPath::component("Author")));
        assert_eq!(field.item_reference(), None);
        assert!(!field.is_array());

        let field = Field::array_of("Book");
        assert_eq!(field.reference_target(), None);
        assert_eq!(field.item_reference(), Some(&RefPath::component("Book")));
        assert!(field.is_array());

        let field = Field::array_of_primitive("string");
        assert_eq!(field.item_reference(), None);
        assert!(field.is_array());
    }

    #[test]
    fn test_primitive_scalar() {
        assert_eq!(Primitive::new("string").scalar(), ScalarType::String);
        assert_eq!(
            Primitive::new("string").with_format("date-time").scalar(),
            ScalarType::DateTime
        );
        assert_eq!(Primitive::default().scalar(), ScalarType::Object);
    }

    #[test]
    fn test_annotated_builder() {
        let field = Field::primitive("string")
            .annotated(keys::UNIQUE, true)
            .annotated(keys::COLUMN_NAME, "email_address");
        assert!(field.annotations.is_unique());
        assert_eq!(field.annotations.column_name(), Some("email_address"));
    }
}

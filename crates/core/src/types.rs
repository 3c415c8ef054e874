//! Shared type definitions for jpagen
//!
//! This module contains the small closed vocabularies used by both the
//! record graph and the code generator: relation kinds, persistence kinds,
//! and the scalar type system fields resolve to.

use serde::{Deserialize, Serialize};

// ============================================================================
// Relation Kinds
// ============================================================================

/// How a field links to another definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    /// Value object stored inline in the owning table
    Embedded,
    /// One record relates to exactly one other record
    OneToOne,
    /// One record relates to many others (e.g., Author has many Books)
    OneToMany,
    /// Many records relate to one (inverse of OneToMany)
    ManyToOne,
    /// Many-to-many through a join table
    ManyToMany,
}

impl RelationKind {
    /// Parse a relation label as written in schema annotations.
    ///
    /// `embedded` is accepted too, although it is normally derived from the
    /// embeddable classification rather than declared.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "embedded" => Some(RelationKind::Embedded),
            "one-to-one" => Some(RelationKind::OneToOne),
            "one-to-many" => Some(RelationKind::OneToMany),
            "many-to-one" => Some(RelationKind::ManyToOne),
            "many-to-many" => Some(RelationKind::ManyToMany),
            _ => None,
        }
    }

    /// Annotation label for this relation kind
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Embedded => "embedded",
            RelationKind::OneToOne => "one-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::ManyToMany => "many-to-many",
        }
    }

    /// Get the inverse relationship kind
    pub fn inverse(&self) -> Self {
        match self {
            RelationKind::Embedded => RelationKind::Embedded,
            RelationKind::OneToOne => RelationKind::OneToOne,
            RelationKind::OneToMany => RelationKind::ManyToOne,
            RelationKind::ManyToOne => RelationKind::OneToMany,
            RelationKind::ManyToMany => RelationKind::ManyToMany,
        }
    }

    /// Whether the owning side holds a collection of the target
    pub fn is_to_many(&self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Persistence Kinds
// ============================================================================

/// Marker value that classifies a definition as a value object
pub const EMBEDDABLE_MARKER: &str = "Embeddable";

/// Marker value used when a persistable definition leaves its kind blank
pub const ENTITY_MARKER: &str = "Entity";

/// What a persistable definition becomes in the generated code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersistenceKind {
    /// A table-backed entity
    #[default]
    Entity,
    /// A value object embedded into its owners
    Embeddable,
    /// A base class whose mappings are inherited by entities
    MappedSuperclass,
    /// Any other annotation name, passed through unchanged
    Other(String),
}

impl PersistenceKind {
    /// Parse an annotation value; blank values fall back to [`PersistenceKind::Entity`]
    pub fn from_marker(marker: &str) -> Self {
        match marker.trim() {
            "" | ENTITY_MARKER => PersistenceKind::Entity,
            EMBEDDABLE_MARKER => PersistenceKind::Embeddable,
            "MappedSuperclass" => PersistenceKind::MappedSuperclass,
            other => PersistenceKind::Other(other.to_string()),
        }
    }

    /// The annotation name emitted on the generated class
    pub fn annotation(&self) -> &str {
        match self {
            PersistenceKind::Entity => ENTITY_MARKER,
            PersistenceKind::Embeddable => EMBEDDABLE_MARKER,
            PersistenceKind::MappedSuperclass => "MappedSuperclass",
            PersistenceKind::Other(name) => name,
        }
    }
}

impl std::fmt::Display for PersistenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.annotation())
    }
}

// ============================================================================
// Scalar Types
// ============================================================================

/// Scalar types a primitive schema field resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    String,
    Integer,
    Decimal,
    Boolean,
    DateTime,
    /// Unrecognized or missing type
    Object,
}

impl ScalarType {
    /// Map a schema `type` / `format` pair to a scalar type.
    ///
    /// `date-time` is accepted both as a type of its own and as the format of
    /// a string.
    pub fn from_schema(kind: Option<&str>, format: Option<&str>) -> Self {
        match (kind, format) {
            (Some("string"), Some("date-time")) => ScalarType::DateTime,
            (Some("string"), _) => ScalarType::String,
            (Some("integer"), _) => ScalarType::Integer,
            (Some("number"), _) => ScalarType::Decimal,
            (Some("boolean"), _) => ScalarType::Boolean,
            (Some("date-time"), _) => ScalarType::DateTime,
            _ => ScalarType::Object,
        }
    }

    /// Java type name for this scalar
    pub fn java_type(&self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Integer => "Integer",
            ScalarType::Decimal => "BigDecimal",
            ScalarType::Boolean => "Boolean",
            ScalarType::DateTime => "LocalDateTime",
            ScalarType::Object => "Object",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.java_type())
    }
}

// ============================================================================
// Tests
// ============================================================================

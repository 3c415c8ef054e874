//! # jpagen IR (Record Graph)
//!
//! This crate holds the in-memory model of an annotated API schema and the
//! resolution passes that run over it before any code is emitted.
//!
//! ## Core Concepts
//!
//! - **Definition**: a named schema record (e.g. `Author`, `Book`)
//! - **Field**: a typed, annotated member of a definition
//! - **Annotations**: `x-` extension keys with typed accessors
//! - **RecordGraph**: arena owning every definition of one document
//!
//! ## Passes
//!
//! - [`Shape::flatten`]: resolve a composite (`allOf`) definition to its
//!   inline field set
//! - [`infer_relations`]: mark the inverse side of declared one-to-many
//!   relations as many-to-one
//! - [`EmbeddableLookup::classify`]: find value-object definitions
//!

// Module declarations
pub mod annotation;
pub mod definition;
pub mod embeddable;
pub mod field;
pub mod graph;
pub mod openapi;
pub mod relation;

// Re-export commonly used types at crate root
pub use annotation::{AnnotationValue, Annotations, keys};
pub use definition::{Branch, Definition, Shape};
pub use embeddable::EmbeddableLookup;
pub use field::{ArrayItem, Field, FieldKind, Primitive, RefPath, SCHEMA_REF_PREFIX};
pub use graph::{DefinitionId, RecordGraph};
pub use openapi::{load_graph, parse_graph};
pub use relation::{
    InferenceReport, InferredRelation, UnresolvedReason, UnresolvedRelation, infer_relations,
};

// Re-export core types that are commonly used with IR
pub use jpagen_core::{
    BackReferenceNaming, EngineError, EngineResult, LowerFirstNaming, PersistenceKind,
    RelationKind, ScalarType, SchemaError,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

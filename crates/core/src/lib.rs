//! # jpagen Core
//!
//! Core types, traits, and error handling for jpagen.
//!
//! This crate provides the foundational building blocks used throughout
//! the generator, including:
//!
//! - **Types**: relation kinds, persistence kinds, and the scalar type system
//! - **Traits**: the back-reference naming policy
//! - **Errors**: `SchemaError` for per-definition failures, `EngineError` and
//!   `EngineResult` for everything else
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult, ResultExt, SchemaError};
pub use traits::{BackReferenceNaming, LowerFirstNaming};
pub use types::{
    EMBEDDABLE_MARKER, ENTITY_MARKER, PersistenceKind, RelationKind, ScalarType,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

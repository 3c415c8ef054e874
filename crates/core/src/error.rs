//! Error types for jpagen
//!
//! Two layers of errors live here. [`SchemaError`] is raised while resolving
//! a single definition and only stops that definition; [`EngineError`] is the
//! run-level error returned by loading, generation, and file writing.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// SchemaError
// ============================================================================

/// A structural problem with one schema definition.
///
/// The generator reports these as warnings and keeps going with the rest of
/// the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A composite definition has no inline branch carrying fields
    #[error("Composite definition '{definition}' has no inline branch with fields")]
    NoInlineBranch { definition: String },

    /// A composite definition's inline branch is itself composite
    #[error("Composite definition '{definition}' nests a composition (only one level allowed)")]
    NestedComposition { definition: String },
}

impl SchemaError {
    /// Name of the definition the error was raised for
    pub fn definition(&self) -> &str {
        match self {
            SchemaError::NoInlineBranch { definition }
            | SchemaError::NestedComposition { definition } => definition,
        }
    }
}

// ============================================================================
// EngineError
// ============================================================================

/// The main error type for jpagen
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// A definition could not be resolved
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The schema document could not be parsed
    #[error("Failed to parse schema document '{path}': {message}")]
    SchemaParse { path: PathBuf, message: String },

    // ========================================================================
    // Rendering Errors
    // ========================================================================
    /// The renderer rejected an entity descriptor
    #[error("Rendering failed for entity '{entity}': {message}")]
    Render { entity: String, message: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON (de)serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl EngineError {
    /// Create a schema parse error
    pub fn schema_parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        EngineError::SchemaParse {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a render error
    pub fn render(entity: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::Render {
            entity: entity.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        EngineError::InvalidConfig(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error comes from schema resolution or parsing
    pub fn is_schema(&self) -> bool {
        matches!(self, EngineError::Schema(_) | EngineError::SchemaParse { .. })
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::Io(_)
                | EngineError::FileRead { .. }
                | EngineError::FileWrite { .. }
                | EngineError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> EngineResult<T>;
}

impl<T, E: Into<EngineError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> EngineResult<T> {
        self.map_err(|e| {
            let err: EngineError = e.into();
            EngineError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_messages() {
        let err = SchemaError::NoInlineBranch {
            definition: "Pet".to_string(),
        };
        assert_eq!(err.definition(), "Pet");
        assert_eq!(
            err.to_string(),
            "Composite definition 'Pet' has no inline branch with fields"
        );

        let err = SchemaError::NestedComposition {
            definition: "Dog".to_string(),
        };
        assert_eq!(err.definition(), "Dog");
        assert!(err.to_string().contains("only one level allowed"));
    }

    #[test]
    fn test_schema_error_converts_transparently() {
        let err: EngineError = SchemaError::NoInlineBranch {
            definition: "Pet".to_string(),
        }
        .into();
        assert!(err.is_schema());
        assert!(!err.is_io());
        assert_eq!(
            err.to_string(),
            "Composite definition 'Pet' has no inline branch with fields"
        );
    }

    #[test]
    fn test_schema_parse_error() {
        let err = EngineError::schema_parse("api.json", "expected value at line 1");
        assert!(err.is_schema());
        assert_eq!(
            err.to_string(),
            "Failed to parse schema document 'api.json': expected value at line 1"
        );
    }

    #[test]
    fn test_render_and_config_errors() {
        let err = EngineError::render("Book", "empty class name");
        assert_eq!(
            err.to_string(),
            "Rendering failed for entity 'Book': empty class name"
        );

        let err = EngineError::invalid_config("package name cannot be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: package name cannot be empty"
        );
    }

    #[test]
    fn test_error_with_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.with_context("Writing Book.java").unwrap_err();
        assert_eq!(err.to_string(), "Writing Book.java: IO error: denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EngineError = io_err.into();
        assert!(err.is_io());
        assert!(!err.is_schema());
    }
}

//! # jpagen Codegen
//!
//! Turns an annotated record graph into JPA entity sources.
//!
//! ## Features
//!
//! - **Descriptor building**: one [`EntityDescriptor`] per persistable
//!   definition, with resolved types, relations, and column constraints
//! - **Java rendering**: JPA + Lombok classes via [`JpaRenderer`]
//! - **Pipeline**: [`Generator`] runs inference, classification, building,
//!   and rendering, and collects warnings instead of failing the run
//!

// ============================================================================
// Modules
// ============================================================================

pub mod descriptor;
pub mod generator;
pub mod java;

// ============================================================================
// Re-exports
// ============================================================================

pub use descriptor::{
    ColumnClause, ColumnConstraints, DescriptorBuilder, ElementKind, EntityDescriptor,
    FieldDescriptor, SuperClass,
};
pub use generator::{GenerationSummary, Generator, Resolution, generate, summarize};
pub use java::JpaRenderer;

use jpagen_core::{EngineError, EngineResult};
use jpagen_ir::{InferenceReport, SCHEMA_REF_PREFIX};
use std::path::{Path, PathBuf};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the code generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Java package of the generated classes
    pub package_name: String,

    /// Output directory for generated code
    pub output_dir: PathBuf,

    /// Prefix the schema document puts in front of definition names
    pub ref_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: "com.example.model".to_string(),
            output_dir: PathBuf::from("./generated"),
            ref_prefix: SCHEMA_REF_PREFIX.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target package
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package_name = package.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the schema reference prefix
    pub fn with_ref_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ref_prefix = prefix.into();
        self
    }

    /// Check that the package is a dotted sequence of Java identifiers
    pub fn validate(&self) -> EngineResult<()> {
        if self.package_name.trim().is_empty() {
            return Err(EngineError::invalid_config("package name must not be empty"));
        }
        if let Some(segment) = self
            .package_name
            .split('.')
            .find(|segment| !java::is_java_identifier(segment))
        {
            return Err(EngineError::invalid_config(format!(
                "package name '{}' has an invalid segment '{segment}'",
                self.package_name
            )));
        }
        if self.ref_prefix.is_empty() {
            return Err(EngineError::invalid_config("reference prefix must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// EntityRenderer
// ============================================================================

/// Renders one entity descriptor into a source file
pub trait EntityRenderer {
    fn render(&self, entity: &EntityDescriptor) -> EngineResult<GeneratedFile>;
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from output directory
    pub path: PathBuf,

    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

// ============================================================================
// GeneratedProject
// ============================================================================

/// Everything one generation run produced
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    /// Target package
    pub name: String,

    /// All generated files
    pub files: Vec<GeneratedFile>,

    /// Warnings generated during code generation
    pub warnings: Vec<String>,

    /// What relation inference did
    pub report: InferenceReport,
}

impl GeneratedProject {
    /// Create a new generated project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a file to the project
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Find a file by its relative path
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path.as_ref())
    }

    /// Write all files to disk
    pub fn write_to_disk(&self, base_dir: impl AsRef<Path>) -> EngineResult<()> {
        let base_dir = base_dir.as_ref();

        for file in &self.files {
            let full_path = base_dir.join(&file.path);

            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(&full_path, &file.content).map_err(|e| EngineError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

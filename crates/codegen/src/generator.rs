//! # Generation Pipeline
//!
//! The `Generator` is the top-level entry point for code generation. It takes
//! a freshly loaded [`RecordGraph`] and a [`GeneratorConfig`], resolves the
//! graph into entity descriptors, and renders each one.
//!
//! ## Pipeline
//!
//! ```text
//! RecordGraph + GeneratorConfig
//!         │
//!         ├──► infer_relations()            → InferenceReport
//!         ├──► EmbeddableLookup::classify()
//!         ├──► DescriptorBuilder::build()   → Vec<EntityDescriptor>
//!         ├──► EntityRenderer::render()     → Vec<GeneratedFile>
//!         │
//!         ▼
//!   GeneratedProject { files, warnings, report }
//! ```
//!
//! A definition that cannot be flattened or rendered becomes a warning; the
//! rest of the graph is still generated.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jpagen_codegen::{Generator, GeneratorConfig};
//!
//! let graph = jpagen_ir::load_graph("openapi.json")?;
//! let config = GeneratorConfig::new().with_package("com.acme.model");
//!
//! let result = Generator::new(config).generate(graph)?;
//! result.write_to_disk("build/generated")?;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jpagen_core::{BackReferenceNaming, EngineResult, LowerFirstNaming};
use jpagen_ir::{EmbeddableLookup, InferenceReport, RecordGraph, infer_relations};
use serde::Serialize;

use crate::descriptor::{DescriptorBuilder, EntityDescriptor};
use crate::java::JpaRenderer;
use crate::{EntityRenderer, GeneratedProject, GeneratorConfig};

/// Shared back-reference naming policy
pub type SharedNaming = Arc<dyn BackReferenceNaming + Send + Sync>;

// ============================================================================
// Resolution
// ============================================================================

/// Resolved descriptors of one graph, before rendering
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resolution {
    /// Descriptors of persistable definitions, in document order
    pub entities: Vec<EntityDescriptor>,

    /// Definitions skipped because their composition could not be flattened
    pub skipped: Vec<String>,

    pub warnings: Vec<String>,

    pub report: InferenceReport,
}

// ============================================================================
// Generator
// ============================================================================

/// Top-level code generator that orchestrates the full generation pipeline.
///
/// The generator holds no graph state; each call consumes its own graph, so
/// separate runs never share one.
#[derive(Clone)]
pub struct Generator<R = JpaRenderer> {
    config: GeneratorConfig,
    renderer: R,
    naming: SharedNaming,
}

impl Generator {
    /// Create a JPA generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_renderer(config, JpaRenderer)
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl<R: EntityRenderer> Generator<R> {
    /// Create a generator with a custom renderer.
    pub fn with_renderer(config: GeneratorConfig, renderer: R) -> Self {
        Self {
            config,
            renderer,
            naming: Arc::new(LowerFirstNaming),
        }
    }

    /// Replace the back-reference naming policy.
    pub fn with_naming(mut self, naming: impl BackReferenceNaming + Send + Sync + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    // ====================================================================
    // Resolution
    // ====================================================================

    /// Resolve a graph into entity descriptors without rendering.
    ///
    /// # Errors
    ///
    /// Only an invalid configuration fails the call. Per-definition problems
    /// end up in [`Resolution::warnings`].
    pub fn resolve(&self, mut graph: RecordGraph) -> EngineResult<Resolution> {
        self.config.validate()?;
        graph.set_ref_prefix(self.config.ref_prefix.as_str());

        // ── 1. Infer inverse relations ───────────────────────────────────
        let report = infer_relations(&mut graph, self.naming.as_ref());

        // ── 2. Classify embeddables ──────────────────────────────────────
        let embeddables = EmbeddableLookup::classify(&graph);

        // ── 3. Build descriptors ─────────────────────────────────────────
        let builder =
            DescriptorBuilder::new(&embeddables, &self.config.package_name, self.naming.as_ref())
                .with_report(&report);

        let mut resolution = Resolution {
            warnings: report
                .unresolved
                .iter()
                .map(|u| {
                    format!(
                        "Relation '{}.{}' to '{}' stays one-sided: {}",
                        u.source, u.field, u.target, u.reason
                    )
                })
                .collect(),
            ..Resolution::default()
        };

        for definition in graph.definitions() {
            match builder.build(definition) {
                Ok(Some(entity)) => {
                    resolution.warnings.extend(entity.warnings.iter().cloned());
                    resolution.entities.push(entity);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        definition = %definition.name,
                        error = %err,
                        "definition skipped"
                    );
                    resolution.skipped.push(definition.name.clone());
                    resolution.warnings.push(err.to_string());
                }
            }
        }

        if resolution.entities.is_empty() {
            resolution
                .warnings
                .push("No persistable definitions found, nothing will be generated.".to_string());
        }

        tracing::info!(
            definitions = graph.len(),
            entities = resolution.entities.len(),
            embeddables = embeddables.len(),
            inferred_relations = report.inferred_count(),
            "graph resolved",
        );

        resolution.report = report;
        Ok(resolution)
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Run the full pipeline on a graph.
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if the configuration is invalid. Renderer
    /// failures are collected as warnings.
    pub fn generate(&self, graph: RecordGraph) -> EngineResult<GeneratedProject> {
        let resolution = self.resolve(graph)?;

        let mut output = GeneratedProject::new(&self.config.package_name);
        output.warnings = resolution.warnings;
        output.report = resolution.report;

        for entity in &resolution.entities {
            match self.renderer.render(entity) {
                Ok(file) => output.add_file(file),
                Err(err) => {
                    tracing::warn!(
                        entity = %entity.class_name,
                        error = %err,
                        "entity not rendered"
                    );
                    output.add_warning(err.to_string());
                }
            }
        }

        tracing::info!(
            files = output.file_count(),
            warnings = output.warnings.len(),
            package = %output.name,
            "code generation complete",
        );

        Ok(output)
    }

    /// Generate code and write all files to the configured output directory.
    pub fn generate_and_write(&self, graph: RecordGraph) -> EngineResult<GeneratedProject> {
        let output = self.generate(graph)?;
        output.write_to_disk(&self.config.output_dir)?;
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            files = output.file_count(),
            "files written to disk",
        );
        Ok(output)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for Generator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Standalone convenience function
// ============================================================================

/// Generate JPA sources for `package` with default settings.
pub fn generate(graph: RecordGraph, package: &str) -> EngineResult<GeneratedProject> {
    Generator::new(GeneratorConfig::new().with_package(package)).generate(graph)
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub package_name: String,
    pub total_files: usize,
    pub inferred_relations: usize,
    pub unresolved_relations: usize,
    pub warning_count: usize,
    /// Total bytes of generated content
    pub total_bytes: usize,
    pub generated_at: DateTime<Utc>,
}

impl GenerationSummary {
    /// Build a summary from a generated project.
    pub fn from_project(project: &GeneratedProject) -> Self {
        Self {
            package_name: project.name.clone(),
            total_files: project.file_count(),
            inferred_relations: project.report.inferred_count(),
            unresolved_relations: project.report.unresolved.len(),
            warning_count: project.warnings.len(),
            total_bytes: project.files.iter().map(|f| f.content.len()).sum(),
            generated_at: Utc::now(),
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(640);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Entity Generation Complete               ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Package:     {:<35}║\n", self.package_name));
        out.push_str(&format!("║  Total Files: {:<35}║\n", self.total_files));
        let relations = format!(
            "{} inferred, {} one-sided",
            self.inferred_relations, self.unresolved_relations
        );
        out.push_str(&format!("║  Relations:   {:<35}║\n", relations));
        out.push_str(&format!("║  Warnings:    {:<35}║\n", self.warning_count));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else if self.total_bytes < 1024 * 1024 {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.total_bytes as f64 / (1024.0 * 1024.0))
        };
        out.push_str(&format!("║  Total Size:  {:<35}║\n", size_str));
        out.push_str(&format!(
            "║  Finished:    {:<35}║\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
        ));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`GeneratedProject`].
pub fn summarize(project: &GeneratedProject) -> GenerationSummary {
    GenerationSummary::from_project(project)
}

// ============================================================================
// Tests
// ============================================================================

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use jpagen_codegen::{GeneratedProject, Generator, GeneratorConfig, summarize};
use jpagen_ir::{SCHEMA_REF_PREFIX, load_graph};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// OpenAPI JSON document, or a directory searched for `*.json` documents
    #[arg(short, long, env = "JPAGEN_SPEC")]
    pub spec: PathBuf,

    /// Java package of the generated classes
    #[arg(short, long, env = "JPAGEN_PACKAGE")]
    pub package: String,

    /// Output directory
    #[arg(short, long, env = "JPAGEN_OUTPUT", default_value = "generated")]
    pub output: PathBuf,

    /// Prefix of schema references in the documents
    #[arg(long, default_value = SCHEMA_REF_PREFIX)]
    pub ref_prefix: String,
}

impl GenerateCommand {
    /// Generate every document; each one gets its own graph
    pub fn run(self) -> Result<Vec<GeneratedProject>> {
        let documents = find_documents(&self.spec)?;

        let config = GeneratorConfig::new()
            .with_package(&self.package)
            .with_output_dir(&self.output)
            .with_ref_prefix(&self.ref_prefix);
        config.validate()?;
        let generator = Generator::new(config);

        let mut projects = Vec::with_capacity(documents.len());
        for document in documents {
            println!();
            println!("  {} {}", "Generating from".cyan().bold(), document.display());

            let graph = load_graph(&document)
                .with_context(|| format!("loading {}", document.display()))?;
            let project = generator
                .generate_and_write(graph)
                .with_context(|| format!("generating from {}", document.display()))?;

            for warning in &project.warnings {
                println!("  {} {warning}", "warning:".yellow().bold());
            }
            for file in &project.files {
                println!("  {} {}", "✓".green(), self.output.join(&file.path).display());
            }
            print!("{}", summarize(&project));

            projects.push(project);
        }

        Ok(projects)
    }
}

/// A single file, or every `*.json` file below a directory in name order
fn find_documents(spec: &Path) -> Result<Vec<PathBuf>> {
    if !spec.is_dir() {
        return Ok(vec![spec.to_path_buf()]);
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(spec).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", spec.display()))?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            documents.push(entry.into_path());
        }
    }

    if documents.is_empty() {
        bail!("no .json documents found under {}", spec.display());
    }
    tracing::info!(count = documents.len(), dir = %spec.display(), "documents found");
    Ok(documents)
}

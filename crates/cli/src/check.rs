use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use jpagen_codegen::{Generator, GeneratorConfig, Resolution};
use jpagen_ir::{SCHEMA_REF_PREFIX, load_graph};
use std::path::PathBuf;

use crate::DEFAULT_PACKAGE;

#[derive(Args, Debug)]
pub struct CheckCommand {
    /// OpenAPI JSON document
    #[arg(short, long, env = "JPAGEN_SPEC")]
    pub spec: PathBuf,

    /// Java package used for the descriptors
    #[arg(short, long, env = "JPAGEN_PACKAGE", default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// Print the resolved descriptors as JSON
    #[arg(long)]
    pub json: bool,

    /// Prefix of schema references in the document
    #[arg(long, default_value = SCHEMA_REF_PREFIX)]
    pub ref_prefix: String,
}

impl CheckCommand {
    pub fn run(self) -> Result<Resolution> {
        let graph = load_graph(&self.spec)
            .with_context(|| format!("loading {}", self.spec.display()))?;

        let config = GeneratorConfig::new()
            .with_package(&self.package)
            .with_ref_prefix(&self.ref_prefix);
        let resolution = Generator::new(config).resolve(graph)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        } else {
            print_report(&resolution);
        }

        Ok(resolution)
    }
}

fn print_report(resolution: &Resolution) {
    println!();
    for entity in &resolution.entities {
        println!(
            "  {} {} ({}, {} fields)",
            "✓".green(),
            entity.class_name.bold(),
            entity.persistence_kind,
            entity.fields.len()
        );
    }
    for name in &resolution.skipped {
        println!("  {} {}", "✗".red(), name.bold());
    }

    let report = &resolution.report;
    println!();
    println!(
        "  relations: {} inferred, {} missing targets, {} missing back-references",
        report.inferred_count(),
        report.missing_targets(),
        report.missing_back_references()
    );
    for warning in &resolution.warnings {
        println!("  {} {warning}", "warning:".yellow().bold());
    }
}

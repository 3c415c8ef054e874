//! # jpagen CLI
//!
//! Command-line interface for jpagen.
//!
//! ## Commands
//!
//! - `generate` - Generate JPA entity sources from OpenAPI documents
//! - `check` - Resolve a document and report what would be generated
//!

mod check;
mod generate;

pub use check::CheckCommand;
pub use generate::GenerateCommand;

// Re-exported for the binary
pub use clap::Parser;

use anyhow::Result;
use clap::Subcommand;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default target package when none is given
pub const DEFAULT_PACKAGE: &str = "com.example.model";

#[derive(Parser, Debug)]
#[command(name = "jpagen")]
#[command(about = "Generate JPA entities from annotated OpenAPI schemas")]
#[command(version)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate entity sources
    Generate(GenerateCommand),
    /// Resolve a document without writing anything
    Check(CheckCommand),
}

/// Execute a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(cmd) => cmd.run().map(drop),
        Command::Check(cmd) => cmd.run().map(drop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "jpagen",
            "generate",
            "--spec",
            "api.json",
            "--package",
            "com.acme.model",
            "--output",
            "build/gen",
        ])
        .unwrap();

        match cli.command {
            Command::Generate(cmd) => {
                assert_eq!(cmd.spec, PathBuf::from("api.json"));
                assert_eq!(cmd.package, "com.acme.model");
                assert_eq!(cmd.output, PathBuf::from("build/gen"));
                assert_eq!(cmd.ref_prefix, "#/components/schemas/");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_check_with_verbosity() {
        let cli =
            Cli::try_parse_from(["jpagen", "-vv", "check", "-s", "api.json", "--json"]).unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Check(cmd) => {
                assert!(cmd.json);
                assert_eq!(cmd.package, DEFAULT_PACKAGE);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["jpagen"]).is_err());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

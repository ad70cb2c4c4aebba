//! partialgen CLI - Host adapter for the partial-type generators
//!
//! Commands:
//! - `partialgen generate` - Run one generation pass over a declaration index
//! - `partialgen check` - Validate a partialgen.toml manifest
//! - `partialgen marker` - Print the marker attribute declaration unit

use clap::{Parser, Subcommand};
use partialgen_core::LogLevel;

mod generate;
mod manifest;
mod sink;

#[derive(Parser)]
#[command(name = "partialgen")]
#[command(author, version, about = "Generates partial-type members from annotated declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one generation pass and write units to a directory
    Generate {
        /// Path to the declaration index (JSON)
        #[arg(short, long)]
        input: String,

        /// Output directory for generated units
        #[arg(short, long)]
        output: String,

        /// Path to partialgen.toml manifest
        #[arg(short, long)]
        manifest: Option<String>,

        /// Generator kind (accessor, loader), overrides the manifest
        #[arg(short, long)]
        kind: Option<String>,

        /// Publish one unit per output group
        #[arg(long)]
        per_group: bool,

        /// Exit with an error if any error diagnostic was reported
        #[arg(long)]
        strict: bool,

        /// Log at debug level regardless of the manifest
        #[arg(short, long)]
        verbose: bool,

        /// Write the pass report as JSON to this path
        #[arg(long)]
        report: Option<String>,
    },

    /// Validate a partialgen.toml manifest
    Check {
        /// Path to partialgen.toml (default: ./partialgen.toml)
        #[arg(short, long)]
        manifest: Option<String>,
    },

    /// Print the marker attribute declaration unit
    Marker {
        /// Generator kind (accessor, loader), overrides the manifest
        #[arg(short, long)]
        kind: Option<String>,

        /// Path to partialgen.toml manifest
        #[arg(short, long)]
        manifest: Option<String>,

        /// Write the unit into this directory instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    partialgen_logging::init_logging(LogLevel::Info);

    match cli.command {
        Commands::Generate {
            input,
            output,
            manifest,
            kind,
            per_group,
            strict,
            verbose,
            report,
        } => {
            generate::run(&generate::GenerateArgs {
                input,
                output,
                manifest,
                kind,
                per_group,
                strict,
                verbose,
                report,
            })?;
        }
        Commands::Check { manifest } => {
            manifest::check(manifest)?;
        }
        Commands::Marker {
            kind,
            manifest,
            output,
        } => {
            generate::marker(kind.as_deref(), manifest.as_deref(), output.as_deref())?;
        }
    }

    Ok(())
}

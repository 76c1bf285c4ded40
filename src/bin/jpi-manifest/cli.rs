//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// jpi-manifest - derive Jenkins plugin manifests from build state
#[derive(Parser)]
#[command(name = "jpi-manifest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the plugin manifest
    Generate(GenerateArgs),

    /// Check the output directories for conflicting generated resources
    Check(CheckArgs),

    /// Show the plugin dependencies and what gets propagated downstream
    Dependencies(DependenciesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where to read the build from.
#[derive(Args)]
pub struct BuildSource {
    /// Build description file (defaults to jpi-build.toml in the current
    /// directory or a parent)
    #[arg(long, value_name = "FILE")]
    pub build: Option<PathBuf>,

    /// Override the host build-tool version
    #[arg(long, env = "JPI_HOST_VERSION", value_name = "VERSION")]
    pub host_version: Option<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: BuildSource,

    /// Write the manifest to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: BuildSource,
}

#[derive(Args)]
pub struct DependenciesArgs {
    #[command(flatten)]
    pub source: BuildSource,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

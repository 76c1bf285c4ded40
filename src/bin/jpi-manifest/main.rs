//! jpi-manifest CLI - derive Jenkins plugin manifests from build state

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jpi_manifest::util::diagnostic;
use jpi_manifest::ManifestError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<ManifestError>() {
            Some(manifest_error) => diagnostic::emit(&manifest_error.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("jpi_manifest=debug")
    } else {
        EnvFilter::new("jpi_manifest=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Check(args) => commands::check::execute(args, color),
        Commands::Dependencies(args) => commands::dependencies::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

//! `jpi-manifest check` command

use anyhow::{Context, Result};

use crate::cli::CheckArgs;
use jpi_manifest::ops::guard_outputs;
use jpi_manifest::util::diagnostic::{self, Diagnostic};
use jpi_manifest::util::fs::relative_path;

pub fn execute(args: CheckArgs, color: bool) -> Result<()> {
    let (build, conventions) = super::load_build(&args.source)?;

    if build.output_dirs.is_empty() {
        diagnostic::emit(
            &Diagnostic::warning("no output directories to check")
                .with_help("List compiled class directories under `output-dirs`"),
            color,
        );
        return Ok(());
    }

    let plugin_class = guard_outputs(&build.output_dirs, &conventions)?;

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    println!("Checked {} output directories", build.output_dirs.len());
    for dir in &build.output_dirs {
        println!("  {}", relative_path(&cwd, dir).display());
    }

    match plugin_class {
        Some(class_name) => println!("Plugin-Class: {}", class_name),
        None => diagnostic::emit(
            &Diagnostic::note(format!(
                "no output directory contains `{}`",
                conventions.plugin_class_marker
            )),
            color,
        ),
    }

    Ok(())
}

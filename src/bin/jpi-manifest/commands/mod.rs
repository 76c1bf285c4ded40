//! Command implementations

pub mod check;
pub mod completions;
pub mod dependencies;
pub mod generate;

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::BuildSource;
use jpi_manifest::util::config::{find_build_description, BuildDescription};
use jpi_manifest::util::diagnostic::suggestions;
use jpi_manifest::{Conventions, HostVersion, PluginBuild};

/// Load the build snapshot selected on the command line.
pub fn load_build(source: &BuildSource) -> Result<(PluginBuild, Conventions)> {
    let path = match source.build {
        Some(ref path) => path.clone(),
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            find_build_description(&cwd).ok_or_else(|| {
                anyhow::anyhow!(
                    "could not find jpi-build.toml in {} or any parent directory\n{}",
                    cwd.display(),
                    suggestions::NO_BUILD_DESCRIPTION
                )
            })?
        }
    };
    tracing::debug!("reading build description {}", path.display());

    let host_override = source
        .host_version
        .as_deref()
        .map(HostVersion::parse)
        .transpose()?;

    let description = BuildDescription::load(&path)?;
    let conventions = description.conventions.clone();
    let base_dir = path.parent().unwrap_or(Path::new("."));
    let build = description.into_build(base_dir, host_override)?;

    Ok((build, conventions))
}

//! jpi-manifest - plugin manifest derivation for Jenkins plugin builds
//!
//! This crate computes the attributes of a plugin's `MANIFEST.MF` from the
//! state of its build: resolved plugin dependencies, compiled output
//! directories and the generated extension index.

pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures for jpi-manifest unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    attributes::ManifestAttributes, build::PluginBuild, configuration::Configuration,
    configuration::ConfigurationSet, conventions::Conventions, host::HostVersion,
    project::PluginProject,
};

pub use ops::{assemble_manifest, ManifestError, ManifestOptions};

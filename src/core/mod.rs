//! Core data structures for jpi-manifest.
//!
//! This module contains the snapshot types handed over by the build tool:
//! - Configurations and their resolved dependency graphs
//! - Project metadata and the host version
//! - Extension declarations and resource scopes
//! - The manifest attribute map itself

pub mod attributes;
pub mod build;
pub mod configuration;
pub mod conventions;
pub mod extension;
pub mod graph;
pub mod host;
pub mod project;

pub use attributes::ManifestAttributes;
pub use build::PluginBuild;
pub use configuration::{Configuration, ConfigurationSet, DeclaredDependency, Propagation};
pub use conventions::Conventions;
pub use extension::{DynamicLoading, ExtensionDeclaration, ResourceScope};
pub use graph::{ResolutionResult, ResolvedComponent, Variant};
pub use host::HostVersion;
pub use project::{Developer, PluginProject};

//! High-level operations.
//!
//! This module contains the manifest derivation steps and the assembler
//! combining them.

pub mod assemble;
pub mod classify;
pub mod dynamic_loading;
pub mod errors;
pub mod output_guard;
pub mod version;

pub use assemble::{assemble_manifest, ManifestOptions};
pub use classify::{
    classify, legacy_list, lister_for, Classification, DeclaredDependencyLister,
    DependencyDescriptor, DependencyLister, ResolvedGraphLister,
};
pub use errors::ManifestError;
pub use output_guard::{check_index_overlap, find_plugin_class, guard_outputs};
pub use version::{SnapshotVersionNormalizer, VersionNormalizer};

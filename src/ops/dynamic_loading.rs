//! Dynamic-loading support detection.
//!
//! A plugin can be installed without restarting the host only if none of its
//! extensions objects to it. The verdict is computed from the extension
//! index the compiler generated into the output directories.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::extension::{DynamicLoading, ResourceScope};

/// Determine whether the compiled outputs support dynamic loading.
///
/// The outputs are searched through a child of `parent`, which lives only
/// for this call.
pub fn detect(
    output_dirs: &[PathBuf],
    extension_index: &str,
    parent: Option<&ResourceScope<'_>>,
) -> Result<DynamicLoading> {
    let scope = match parent {
        Some(parent) => ResourceScope::child(output_dirs.iter().cloned(), parent),
        None => ResourceScope::new(output_dirs.iter().cloned()),
    };

    let mut markers = Vec::new();
    for declaration in scope.extensions(extension_index) {
        let declaration = declaration?;
        tracing::debug!(
            "extension `{}` is dynamic-loadable: {}",
            declaration.class_name,
            declaration.dynamic_loadable
        );
        markers.push(declaration.dynamic_loadable);
    }

    let verdict = DynamicLoading::reduce(markers);
    tracing::debug!("dynamic loading verdict: {}", verdict);
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conventions::EXTENSION_INDEX;
    use crate::test_support::OutputDirFixture;
    use tempfile::TempDir;

    fn verdict_for(markers: &[&str]) -> DynamicLoading {
        let tmp = TempDir::new().unwrap();
        let dir = OutputDirFixture::new(tmp.path(), "classes")
            .extensions(markers.iter().enumerate().map(|(i, m)| (format!("org.example.Ext{}", i), *m)))
            .create();
        detect(&[dir], EXTENSION_INDEX, None).unwrap()
    }

    #[test]
    fn test_reduction_over_index() {
        assert_eq!(verdict_for(&["YES", "YES"]), DynamicLoading::Yes);
        assert_eq!(verdict_for(&["YES", "NO"]), DynamicLoading::No);
        assert_eq!(verdict_for(&["YES", "MAYBE"]), DynamicLoading::Maybe);
        assert_eq!(verdict_for(&[]), DynamicLoading::Yes);
    }

    #[test]
    fn test_no_index_is_yes() {
        let tmp = TempDir::new().unwrap();
        let dir = OutputDirFixture::new(tmp.path(), "classes").create();
        assert_eq!(detect(&[dir], EXTENSION_INDEX, None).unwrap(), DynamicLoading::Yes);
    }

    #[test]
    fn test_parent_scope_extensions_are_seen() {
        let tmp = TempDir::new().unwrap();
        let core = OutputDirFixture::new(tmp.path(), "core")
            .extensions([("jenkins.Core".to_string(), "NO")])
            .create();
        let dir = OutputDirFixture::new(tmp.path(), "classes")
            .extensions([("org.example.Ext".to_string(), "YES")])
            .create();

        let parent = ResourceScope::new(vec![core]);
        let verdict = detect(&[dir], EXTENSION_INDEX, Some(&parent)).unwrap();
        assert_eq!(verdict, DynamicLoading::No);
    }

    #[test]
    fn test_malformed_index_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let dir = OutputDirFixture::new(tmp.path(), "classes")
            .index_file("hudson.Extension", "not json")
            .create();

        let err = detect(&[dir], EXTENSION_INDEX, None).unwrap_err();
        assert!(err.to_string().contains("invalid extension index"));
    }
}

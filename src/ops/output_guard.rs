//! Guards against build outputs that cannot be packaged into one plugin.
//!
//! When plugin sources are compiled in separate passes (e.g. Java and Groovy
//! compiled independently) each output directory gets its own generated
//! resources. Two copies of the entry-point marker or of an annotation index
//! would shadow each other inside the packaged plugin, so both are fatal.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::conventions::Conventions;
use crate::ops::errors::ManifestError;
use crate::util::fs;

/// Find the plugin entry-point class declared by the output directories.
///
/// Returns `None` if no directory contains the marker and fails if more than
/// one does.
pub fn find_plugin_class(output_dirs: &[PathBuf], marker: &str) -> Result<Option<String>> {
    let declaring: Vec<&PathBuf> = output_dirs
        .iter()
        .filter(|dir| dir.join(marker).is_file())
        .collect();

    match declaring.as_slice() {
        [] => {
            tracing::debug!("no `{}` in any output directory", marker);
            Ok(None)
        }
        [dir] => {
            let class_name = fs::read_first_line(&dir.join(marker))?;
            tracing::debug!("plugin class `{}` declared in {}", class_name, dir.display());
            Ok(Some(class_name))
        }
        _ => Err(ManifestError::MultiplePluginClasses {
            paths: declaring.into_iter().cloned().collect(),
        }
        .into()),
    }
}

/// Fail if two output directories contain the same annotation index file.
pub fn check_index_overlap(output_dirs: &[PathBuf], index_dir: &str) -> Result<()> {
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for dir in output_dirs {
        for file in fs::list_files(&dir.join(index_dir))? {
            let Some(file_name) = file.file_name() else {
                continue;
            };
            let file_name = file_name.to_string_lossy().into_owned();

            if let Some(first) = seen.get(&file_name) {
                return Err(ManifestError::OverlappingIndex {
                    file_name,
                    directories: vec![first.clone(), dir.clone()],
                }
                .into());
            }
            seen.insert(file_name, dir.clone());
        }
    }

    tracing::debug!("{} annotation index file(s), no overlap", seen.len());
    Ok(())
}

/// Run both output checks and return the plugin class, if any.
pub fn guard_outputs(output_dirs: &[PathBuf], conventions: &Conventions) -> Result<Option<String>> {
    let plugin_class = find_plugin_class(output_dirs, &conventions.plugin_class_marker)?;
    check_index_overlap(output_dirs, &conventions.annotation_index_dir)?;
    Ok(plugin_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conventions::{ANNOTATION_INDEX_DIR, PLUGIN_CLASS_MARKER};
    use crate::test_support::OutputDirFixture;
    use tempfile::TempDir;

    #[test]
    fn test_single_plugin_class() {
        let tmp = TempDir::new().unwrap();
        let java = OutputDirFixture::new(tmp.path(), "java/main")
            .plugin_class("org.example.HelloPlugin")
            .create();
        let groovy = OutputDirFixture::new(tmp.path(), "groovy/main").create();

        let class = find_plugin_class(&[java, groovy], PLUGIN_CLASS_MARKER).unwrap();
        assert_eq!(class.as_deref(), Some("org.example.HelloPlugin"));
    }

    #[test]
    fn test_no_plugin_class() {
        let tmp = TempDir::new().unwrap();
        let java = OutputDirFixture::new(tmp.path(), "java/main").create();

        let class = find_plugin_class(&[java, tmp.path().join("missing")], PLUGIN_CLASS_MARKER).unwrap();
        assert!(class.is_none());
    }

    #[test]
    fn test_multiple_plugin_classes_fail() {
        let tmp = TempDir::new().unwrap();
        let java = OutputDirFixture::new(tmp.path(), "java/main")
            .plugin_class("org.example.A")
            .create();
        let groovy = OutputDirFixture::new(tmp.path(), "groovy/main")
            .plugin_class("org.example.B")
            .create();

        let err = find_plugin_class(&[java.clone(), groovy.clone()], PLUGIN_CLASS_MARKER).unwrap_err();

        match err.downcast_ref::<ManifestError>() {
            Some(ManifestError::MultiplePluginClasses { paths }) => {
                assert_eq!(paths, &vec![java.clone(), groovy.clone()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains(&java.display().to_string()));
        assert!(message.contains(&groovy.display().to_string()));
    }

    #[test]
    fn test_overlapping_index_fails() {
        let tmp = TempDir::new().unwrap();
        let java = OutputDirFixture::new(tmp.path(), "java/main")
            .index_file("foo.index", "[]")
            .create();
        let groovy = OutputDirFixture::new(tmp.path(), "groovy/main")
            .index_file("foo.index", "[]")
            .create();

        let err = check_index_overlap(&[java, groovy], ANNOTATION_INDEX_DIR).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::OverlappingIndex { file_name, .. }) if file_name == "foo.index"
        ));
        assert!(err.to_string().contains("foo.index"));
    }

    #[test]
    fn test_distinct_index_files_pass() {
        let tmp = TempDir::new().unwrap();
        let java = OutputDirFixture::new(tmp.path(), "java/main")
            .index_file("foo.index", "[]")
            .create();
        let groovy = OutputDirFixture::new(tmp.path(), "groovy/main")
            .index_file("bar.index", "[]")
            .create();

        check_index_overlap(&[java, groovy], ANNOTATION_INDEX_DIR).unwrap();
    }

    #[test]
    fn test_directory_with_index_name_is_not_a_duplicate() {
        let tmp = TempDir::new().unwrap();
        let java = OutputDirFixture::new(tmp.path(), "java/main")
            .index_file("foo.index", "[]")
            .create();
        let groovy = OutputDirFixture::new(tmp.path(), "groovy/main").create();
        std::fs::create_dir_all(groovy.join(ANNOTATION_INDEX_DIR).join("foo.index")).unwrap();

        check_index_overlap(&[java, groovy], ANNOTATION_INDEX_DIR).unwrap();
    }
}

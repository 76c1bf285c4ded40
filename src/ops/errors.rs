//! Manifest derivation error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while deriving manifest attributes.
///
/// All variants are fatal: no partial manifest is produced.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    #[error(
        "found multiple directories containing plugin implementations ({}); use joint compilation to work around this problem",
        quote_paths(.paths)
    )]
    #[diagnostic(
        code(jpi::manifest::multiple_plugin_classes),
        help("compile all source sets that contribute plugin classes into one output directory")
    )]
    MultiplePluginClasses { paths: Vec<PathBuf> },

    #[error("found overlapping annotation index file: `{file_name}`; use joint compilation")]
    #[diagnostic(
        code(jpi::manifest::overlapping_index),
        help("compile all source sets that generate annotation indexes into one output directory")
    )]
    OverlappingIndex {
        file_name: String,
        directories: Vec<PathBuf>,
    },

    #[error("invalid extension index `{}`: {message}", .path.display())]
    #[diagnostic(code(jpi::manifest::invalid_index))]
    InvalidIndex { path: PathBuf, message: String },
}

fn quote_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ManifestError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::MultiplePluginClasses { paths } => {
                let mut diag = Diagnostic::error(
                    "found multiple directories containing plugin implementations",
                );
                for path in paths {
                    diag = diag.with_note(format!("plugin class declared in {}", path.display()));
                }
                diag.with_help(suggestions::JOINT_COMPILATION)
            }

            ManifestError::OverlappingIndex {
                file_name,
                directories,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "found overlapping annotation index file: `{}`",
                    file_name
                ));
                for dir in directories {
                    diag = diag.with_note(format!("generated in {}", dir.display()));
                }
                diag.with_help(suggestions::JOINT_COMPILATION)
            }

            ManifestError::InvalidIndex { path, message } => {
                Diagnostic::error(format!("invalid extension index: {}", message))
                    .at(path)
                    .with_help(suggestions::CLEAN_REBUILD)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_plugin_classes_message_names_all_paths() {
        let err = ManifestError::MultiplePluginClasses {
            paths: vec![
                PathBuf::from("build/classes/java/main/META-INF/services/hudson.Plugin"),
                PathBuf::from("build/classes/groovy/main/META-INF/services/hudson.Plugin"),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("'build/classes/java/main/META-INF/services/hudson.Plugin'"));
        assert!(message.contains("'build/classes/groovy/main/META-INF/services/hudson.Plugin'"));
        assert!(message.contains("joint compilation"));
    }

    #[test]
    fn test_overlapping_index_diagnostic() {
        let err = ManifestError::OverlappingIndex {
            file_name: "hudson.Extension".to_string(),
            directories: vec![PathBuf::from("java/main"), PathBuf::from("groovy/main")],
        };

        let output = err.to_diagnostic().to_string();
        assert!(output.contains("overlapping annotation index file: `hudson.Extension`"));
        assert!(output.contains("generated in groovy/main"));
        assert!(output.contains("joint compilation"));
    }
}

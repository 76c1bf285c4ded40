//! Test fixtures for common test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::configuration::{Configuration, DeclaredDependency};
use crate::core::conventions::{ANNOTATION_INDEX_DIR, EXTENSION_INDEX, PLUGIN_CLASS_MARKER};
use crate::core::graph::{ResolutionResult, ResolvedComponent, Variant};

/// A resolved component with a single library variant.
pub fn library(group: &str, name: &str, version: &str) -> ResolvedComponent {
    ResolvedComponent::new(group, name, version).with_variant(Variant::library("runtime"))
}

/// A resolvable plugin runtime classpath whose modules are both declared
/// and resolved, in the given order.
pub fn plugin_classpath(name: &str, modules: &[(&str, &str, &str)]) -> Configuration {
    let mut graph = ResolutionResult::new("plugin");
    let mut config = Configuration::new(name)
        .resolvable(true)
        .with_plugin_runtime_attributes();

    for &(group, module, version) in modules {
        graph.add_root_dependency(library(group, module, version));
        config = config.with_dependency(DeclaredDependency::new(group, module, version));
    }

    config.with_resolution(graph)
}

/// Fixture for one compiled output directory.
#[derive(Debug, Clone)]
pub struct OutputDirFixture {
    /// Directory that will be created.
    pub path: PathBuf,
    /// Content of the plugin class marker, if any.
    pub plugin_class: Option<String>,
    /// Extensions written to the extension index (class, marker).
    pub extensions: Option<Vec<(String, String)>>,
    /// Raw annotation index files (file name -> content).
    pub index_files: Vec<(String, String)>,
}

impl OutputDirFixture {
    /// Create a fixture for `base/relative`.
    pub fn new(base: &Path, relative: &str) -> Self {
        OutputDirFixture {
            path: base.join(relative),
            plugin_class: None,
            extensions: None,
            index_files: Vec::new(),
        }
    }

    /// Declare a plugin entry-point class.
    pub fn plugin_class(mut self, class_name: &str) -> Self {
        self.plugin_class = Some(class_name.to_string());
        self
    }

    /// Declare extensions with their `dynamicLoadable` marker.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = (String, S)>,
        S: Into<String>,
    {
        self.extensions = Some(
            extensions
                .into_iter()
                .map(|(class, marker)| (class, marker.into()))
                .collect(),
        );
        self
    }

    /// Add a raw file to the annotation index directory.
    pub fn index_file(mut self, name: &str, content: &str) -> Self {
        self.index_files.push((name.to_string(), content.to_string()));
        self
    }

    /// Write the fixture to disk and return its path.
    pub fn create(self) -> PathBuf {
        fs::create_dir_all(&self.path).unwrap();

        if let Some(ref class_name) = self.plugin_class {
            write(&self.path.join(PLUGIN_CLASS_MARKER), &format!("{}\n", class_name));
        }

        if let Some(ref extensions) = self.extensions {
            let entries: Vec<String> = extensions
                .iter()
                .map(|(class, marker)| {
                    format!(r#"{{"class": "{}", "dynamicLoadable": "{}"}}"#, class, marker)
                })
                .collect();
            write(
                &self.path.join(EXTENSION_INDEX),
                &format!("[{}]", entries.join(", ")),
            );
        }

        for (name, content) in &self.index_files {
            write(&self.path.join(ANNOTATION_INDEX_DIR).join(name), content);
        }

        self.path
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

//! Well-known names and paths of the plugin build.
//!
//! Every value has a default matching the standard Jenkins plugin layout and
//! can be overridden from the `[conventions]` table of the build description.

use serde::{Deserialize, Serialize};

use crate::core::configuration::{attribute, Configuration};

/// Marker resource naming the plugin's entry-point class.
pub const PLUGIN_CLASS_MARKER: &str = "META-INF/services/hudson.Plugin";

/// Directory holding generated annotation indexes.
pub const ANNOTATION_INDEX_DIR: &str = "META-INF/annotations";

/// Annotation index listing extension implementations.
pub const EXTENSION_INDEX: &str = "META-INF/annotations/hudson.Extension";

/// Names and paths the manifest derivation relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Conventions {
    /// The non-optional plugin runtime classpath
    pub runtime_classpath: String,

    /// The test runtime classpath, never classified
    pub test_runtime_classpath: String,

    /// Outgoing configuration receiving propagated plugin dependencies
    pub runtime_elements: String,

    /// Expected `org.gradle.usage` of plugin runtime classpaths
    pub usage: String,

    /// Expected `org.gradle.category` of plugin runtime classpaths
    pub category: String,

    /// Expected `org.gradle.libraryelements` of plugin runtime classpaths
    pub library_elements: String,

    /// Relative path of the entry-point marker in an output directory
    pub plugin_class_marker: String,

    /// Relative path of the annotation index directory
    pub annotation_index_dir: String,

    /// Relative path of the extension index resource
    pub extension_index: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Conventions {
            runtime_classpath: "runtimeClasspathJenkins".to_string(),
            test_runtime_classpath: "testRuntimeClasspathJenkins".to_string(),
            runtime_elements: "runtimeElementsJenkins".to_string(),
            usage: attribute::USAGE_JENKINS_RUNTIME.to_string(),
            category: attribute::CATEGORY_LIBRARY.to_string(),
            library_elements: attribute::LIBRARY_ELEMENTS_JPI.to_string(),
            plugin_class_marker: PLUGIN_CLASS_MARKER.to_string(),
            annotation_index_dir: ANNOTATION_INDEX_DIR.to_string(),
            extension_index: EXTENSION_INDEX.to_string(),
        }
    }
}

impl Conventions {
    /// Check whether a configuration carries the plugin runtime attribute signature.
    pub fn matches_plugin_runtime(&self, configuration: &Configuration) -> bool {
        configuration.attribute(attribute::USAGE) == Some(self.usage.as_str())
            && configuration.attribute(attribute::CATEGORY) == Some(self.category.as_str())
            && configuration.attribute(attribute::LIBRARY_ELEMENTS)
                == Some(self.library_elements.as_str())
    }

    /// Check whether dependencies of this configuration are optional plugin dependencies.
    pub fn is_optional_classpath(&self, configuration: &Configuration) -> bool {
        configuration.name() != self.runtime_classpath
    }

    /// Select the configurations whose dependencies become plugin dependencies,
    /// in declaration order.
    pub fn plugin_classpaths<'a, I>(&self, configurations: I) -> Vec<&'a Configuration>
    where
        I: IntoIterator<Item = &'a Configuration>,
    {
        configurations
            .into_iter()
            .filter(|c| c.is_resolvable())
            .filter(|c| c.name() != self.test_runtime_classpath)
            .filter(|c| self.matches_plugin_runtime(c))
            .collect()
    }
}

//! Build description files.
//!
//! The CLI reads the state of a plugin build from a TOML file, by default
//! `jpi-build.toml`, looked up from the current directory upwards:
//!
//! ```toml
//! output-dirs = ["build/classes/*/main", "build/resources/main"]
//!
//! [host]
//! version = "7.6"
//!
//! [project]
//! group = "org.example"
//! short-name = "hello"
//! version = "1.0-SNAPSHOT"
//!
//! [[configurations]]
//! name = "runtimeClasspathJenkins"
//! resolvable = true
//! attributes = { "org.gradle.usage" = "jenkins-runtime", "org.gradle.category" = "library", "org.gradle.libraryelements" = "jpi" }
//! dependencies = [{ group = "org.jenkins-ci.plugins", name = "credentials", version = "2.3" }]
//!
//! [[configurations.resolution]]
//! kind = "resolved"
//! group = "org.jenkins-ci.plugins"
//! name = "credentials"
//! version = "2.3"
//! variants = [{ name = "runtime", attributes = { "org.gradle.category" = "library" } }]
//! ```
//!
//! Output directories are relative to the file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::build::PluginBuild;
use crate::core::configuration::{AttributeSet, Configuration, ConfigurationSet, DeclaredDependency};
use crate::core::conventions::Conventions;
use crate::core::graph::{ResolutionResult, ResolvedComponent, Variant};
use crate::core::host::HostVersion;
use crate::core::project::PluginProject;
use crate::util::fs::expand_dirs;

/// Default build description file name.
pub const BUILD_DESCRIPTION_NAME: &str = "jpi-build.toml";

/// Serialized state of a plugin build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildDescription {
    pub host: HostSection,
    pub project: PluginProject,
    pub output_dirs: Vec<String>,
    pub configurations: Vec<ConfigurationSpec>,
    pub conventions: Conventions,
}

/// The `[host]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSection {
    /// Build tool version
    pub version: Option<String>,
}

/// One `[[configurations]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationSpec {
    pub name: String,

    #[serde(default)]
    pub resolvable: bool,

    #[serde(default)]
    pub attributes: AttributeSet,

    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,

    /// Direct edges of the resolved graph; absent if never resolved
    #[serde(default)]
    pub resolution: Option<Vec<EdgeSpec>>,
}

/// An edge of a resolved graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EdgeSpec {
    Resolved(ComponentSpec),
    Constraint(ComponentSpec),
    Unresolved {
        requested: String,
        #[serde(default)]
        reason: String,
    },
}

/// A selected component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub group: String,
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub variants: Vec<VariantSpec>,
}

/// A published variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantSpec {
    pub name: String,
    pub attributes: AttributeSet,
}

impl From<ComponentSpec> for ResolvedComponent {
    fn from(spec: ComponentSpec) -> Self {
        ResolvedComponent {
            group: spec.group,
            name: spec.name,
            version: spec.version,
            variants: spec
                .variants
                .into_iter()
                .map(|v| Variant {
                    name: v.name,
                    attributes: v.attributes,
                })
                .collect(),
        }
    }
}

impl ConfigurationSpec {
    /// Convert to a configuration, building its resolution graph.
    pub fn to_configuration(&self) -> Configuration {
        let mut config = Configuration::new(&self.name)
            .resolvable(self.resolvable)
            .with_attributes(self.attributes.clone());

        for dep in &self.dependencies {
            config = config.with_dependency(dep.clone());
        }

        if let Some(ref edges) = self.resolution {
            let mut graph = ResolutionResult::new(&self.name);
            let root = graph.root();
            for edge in edges {
                match edge.clone() {
                    EdgeSpec::Resolved(component) => {
                        graph.add_dependency(root, component.into());
                    }
                    EdgeSpec::Constraint(component) => {
                        graph.add_constraint(root, component.into());
                    }
                    EdgeSpec::Unresolved { requested, reason } => {
                        graph.add_unresolved(root, requested, reason);
                    }
                }
            }
            config = config.with_resolution(graph);
        }

        config
    }
}

impl BuildDescription {
    /// Load a build description from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build description: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse build description: {}", path.display()))
    }

    /// Convert into a build snapshot.
    ///
    /// `host_override` takes precedence over the `[host]` section. Output
    /// directories are resolved against `base_dir`.
    pub fn into_build(self, base_dir: &Path, host_override: Option<HostVersion>) -> Result<PluginBuild> {
        let host = match host_override {
            Some(host) => host,
            None => {
                let raw = self.host.version.as_deref().context(
                    "host version not specified; set `[host] version` or pass `--host-version`",
                )?;
                HostVersion::parse(raw)?
            }
        };

        let output_dirs = expand_dirs(base_dir, &self.output_dirs)?;
        if output_dirs.is_empty() {
            tracing::warn!("no output directories configured");
        }

        let configurations: ConfigurationSet = self
            .configurations
            .iter()
            .map(ConfigurationSpec::to_configuration)
            .collect();

        Ok(PluginBuild::new(host, self.project)
            .with_configurations(configurations)
            .with_output_dirs(output_dirs))
    }
}

/// Find the build description starting from `start`, walking up parents.
pub fn find_build_description(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(BUILD_DESCRIPTION_NAME))
        .find(|candidate| candidate.is_file())
}

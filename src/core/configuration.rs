//! Configurations: named dependency buckets of the plugin build.
//!
//! A configuration declares dependencies and, when it is resolvable, carries
//! the resolution result the build tool produced for it. Configurations are
//! snapshots handed to us by the build tool; the only one we ever mutate is
//! the runtime-elements configuration, through [`ConfigurationSet::apply_propagations`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::graph::ResolutionResult;

/// Standard attribute names used to tag configurations and variants.
pub mod attribute {
    pub const USAGE: &str = "org.gradle.usage";
    pub const CATEGORY: &str = "org.gradle.category";
    pub const LIBRARY_ELEMENTS: &str = "org.gradle.libraryelements";

    /// Category value for ordinary libraries (as opposed to platforms).
    pub const CATEGORY_LIBRARY: &str = "library";
    /// Usage value for the plugin runtime classpath.
    pub const USAGE_JENKINS_RUNTIME: &str = "jenkins-runtime";
    /// Library-elements value for packaged plugins.
    pub const LIBRARY_ELEMENTS_JPI: &str = "jpi";
}

/// Attribute map attached to a configuration or a published variant.
pub type AttributeSet = BTreeMap<String, String>;

/// A dependency as declared in the build script, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredDependency {
    /// Module group (absent for file or project dependencies)
    #[serde(default)]
    pub group: Option<String>,

    /// Module name
    pub name: String,

    /// Requested version
    #[serde(default)]
    pub version: Option<String>,
}

impl DeclaredDependency {
    /// Create a declared module dependency.
    pub fn new(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        DeclaredDependency {
            group: Some(group.into()),
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Check whether this declaration targets the given module.
    pub fn matches_module(&self, group: &str, name: &str) -> bool {
        self.group.as_deref() == Some(group) && self.name == name
    }
}

impl fmt::Display for DeclaredDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref group) = self.group {
            write!(f, "{}:", group)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(ref version) = self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

/// A named configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    name: String,
    resolvable: bool,
    attributes: AttributeSet,
    dependencies: Vec<DeclaredDependency>,
    resolution: Option<ResolutionResult>,
}

impl Configuration {
    /// Create a new, non-resolvable configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Configuration {
            name: name.into(),
            resolvable: false,
            attributes: AttributeSet::new(),
            dependencies: Vec::new(),
            resolution: None,
        }
    }

    /// Mark the configuration as resolvable.
    pub fn resolvable(mut self, resolvable: bool) -> Self {
        self.resolvable = resolvable;
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace all attributes.
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    /// Tag the configuration as a plugin runtime classpath.
    pub fn with_plugin_runtime_attributes(self) -> Self {
        self.with_attribute(attribute::USAGE, attribute::USAGE_JENKINS_RUNTIME)
            .with_attribute(attribute::CATEGORY, attribute::CATEGORY_LIBRARY)
            .with_attribute(attribute::LIBRARY_ELEMENTS, attribute::LIBRARY_ELEMENTS_JPI)
    }

    /// Add a declared dependency.
    pub fn with_dependency(mut self, dependency: DeclaredDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Attach the resolution result of this configuration.
    pub fn with_resolution(mut self, resolution: ResolutionResult) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Get the configuration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the configuration can be resolved.
    pub fn is_resolvable(&self) -> bool {
        self.resolvable
    }

    /// Get the configuration attributes.
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Get a single attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Dependencies declared directly on this configuration.
    pub fn dependencies(&self) -> &[DeclaredDependency] {
        &self.dependencies
    }

    /// The resolution result, if the configuration was resolved.
    pub fn resolution(&self) -> Option<&ResolutionResult> {
        self.resolution.as_ref()
    }

    /// Add a dependency unless an identical one is already declared.
    ///
    /// Returns `true` if the dependency was added.
    pub fn add_dependency(&mut self, dependency: DeclaredDependency) -> bool {
        if self.dependencies.contains(&dependency) {
            return false;
        }
        self.dependencies.push(dependency);
        true
    }
}

/// Instruction to expose a dependency through the runtime-elements configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    /// Configuration the dependency was discovered in
    pub from: String,

    /// The declared dependency to forward to consumers
    pub dependency: DeclaredDependency,
}

/// All configurations of a build, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationSet {
    configurations: Vec<Configuration>,
}

impl ConfigurationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        ConfigurationSet {
            configurations: Vec::new(),
        }
    }

    /// Add a configuration, replacing any existing one with the same name.
    pub fn add(&mut self, configuration: Configuration) {
        match self
            .configurations
            .iter_mut()
            .find(|c| c.name == configuration.name)
        {
            Some(existing) => *existing = configuration,
            None => self.configurations.push(configuration),
        }
    }

    /// Look up a configuration by name.
    pub fn get(&self, name: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Look up a configuration by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Configuration> {
        self.configurations.iter_mut().find(|c| c.name == name)
    }

    /// Iterate over all configurations.
    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.configurations.iter()
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    /// Check if there are no configurations.
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Register propagated dependencies on the runtime-elements configuration.
    ///
    /// The target configuration is created if the build did not declare it.
    /// Returns the number of dependencies actually added.
    pub fn apply_propagations(&mut self, runtime_elements: &str, propagations: &[Propagation]) -> usize {
        if propagations.is_empty() {
            return 0;
        }

        if self.get(runtime_elements).is_none() {
            tracing::debug!("creating `{}` to receive propagated dependencies", runtime_elements);
            self.add(Configuration::new(runtime_elements));
        }

        let mut added = 0;
        if let Some(target) = self.get_mut(runtime_elements) {
            for propagation in propagations {
                if target.add_dependency(propagation.dependency.clone()) {
                    tracing::debug!(
                        "propagated {} from `{}` to `{}`",
                        propagation.dependency,
                        propagation.from,
                        runtime_elements
                    );
                    added += 1;
                }
            }
        }
        added
    }
}

impl FromIterator<Configuration> for ConfigurationSet {
    fn from_iter<I: IntoIterator<Item = Configuration>>(iter: I) -> Self {
        let mut set = ConfigurationSet::new();
        for configuration in iter {
            set.add(configuration);
        }
        set
    }
}

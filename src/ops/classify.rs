//! Plugin dependency classification.
//!
//! Turns the plugin runtime classpaths of a build into the
//! `Plugin-Dependencies` attribute. Two strategies exist:
//!
//! - [`ResolvedGraphLister`] walks the resolved dependency graph, drops
//!   platforms and reports which declared dependencies must be propagated to
//!   the runtime-elements configuration.
//! - [`DeclaredDependencyLister`] is the fallback for hosts that cannot
//!   report resolved graphs. It lists declared dependencies as-is and can
//!   neither filter platforms nor propagate anything.
//!
//! Both are pure: propagation is returned as data and applied by the caller.

use std::fmt;

use crate::core::configuration::{Configuration, ConfigurationSet, Propagation};
use crate::core::conventions::Conventions;
use crate::core::graph::DependencyResult;
use crate::core::host::HostVersion;

/// Suffix marking an optional plugin dependency.
pub const OPTIONAL_RESOLUTION: &str = ";resolution:=optional";

/// One entry of the plugin dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor {
    pub name: String,
    pub version: String,
    pub optional: bool,
}

impl DependencyDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>, optional: bool) -> Self {
        DependencyDescriptor {
            name: name.into(),
            version: version.into(),
            optional,
        }
    }
}

impl fmt::Display for DependencyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)?;
        if self.optional {
            f.write_str(OPTIONAL_RESOLUTION)?;
        }
        Ok(())
    }
}

/// Join descriptors into the attribute format: `a:1.0,b:2.0;resolution:=optional`.
pub fn format_dependencies(descriptors: &[DependencyDescriptor]) -> String {
    descriptors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Result of classifying the plugin runtime classpaths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Plugin dependencies in traversal order
    pub descriptors: Vec<DependencyDescriptor>,

    /// Declared dependencies to expose through the runtime-elements configuration
    pub propagations: Vec<Propagation>,
}

impl Classification {
    /// The `Plugin-Dependencies` attribute value; empty when there are none.
    pub fn to_attribute(&self) -> String {
        format_dependencies(&self.descriptors)
    }

    fn extend(&mut self, other: Classification) {
        self.descriptors.extend(other.descriptors);
        self.propagations.extend(other.propagations);
    }
}

/// Strategy listing the plugin dependencies of a build.
pub trait DependencyLister {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Classify the dependencies of every plugin runtime classpath.
    fn list(&self, configurations: &ConfigurationSet, conventions: &Conventions) -> Classification;
}

/// Pick the listing strategy supported by the host.
pub fn lister_for(host: &HostVersion) -> Box<dyn DependencyLister> {
    if host.supports_resolved_graphs() {
        Box::new(ResolvedGraphLister)
    } else {
        Box::new(DeclaredDependencyLister)
    }
}

/// Lists plugin dependencies from resolved dependency graphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedGraphLister;

impl DependencyLister for ResolvedGraphLister {
    fn name(&self) -> &'static str {
        "resolved-graph"
    }

    fn list(&self, configurations: &ConfigurationSet, conventions: &Conventions) -> Classification {
        classify(configurations, conventions)
    }
}

/// Lists declared plugin dependencies without resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredDependencyLister;

impl DependencyLister for DeclaredDependencyLister {
    fn name(&self) -> &'static str {
        "declared"
    }

    fn list(&self, configurations: &ConfigurationSet, conventions: &Conventions) -> Classification {
        let descriptors = conventions
            .plugin_classpaths(configurations.iter())
            .into_iter()
            .flat_map(|c| legacy_descriptors(c, conventions.is_optional_classpath(c)))
            .collect();

        Classification {
            descriptors,
            propagations: Vec::new(),
        }
    }
}

/// Classify every plugin runtime classpath using its resolved graph.
pub fn classify(configurations: &ConfigurationSet, conventions: &Conventions) -> Classification {
    let mut result = Classification::default();
    for configuration in conventions.plugin_classpaths(configurations.iter()) {
        let optional = conventions.is_optional_classpath(configuration);
        result.extend(classify_configuration(configuration, optional));
    }
    result
}

/// Classify the direct dependencies of one resolved configuration.
pub fn classify_configuration(configuration: &Configuration, optional: bool) -> Classification {
    let mut result = Classification::default();

    let Some(resolution) = configuration.resolution() else {
        tracing::debug!("`{}` has no resolution result", configuration.name());
        return result;
    };
    tracing::debug!(
        "classifying `{}` ({} selected components)",
        configuration.name(),
        resolution.component_count()
    );

    for dependency in resolution.root_dependencies() {
        let component = match dependency {
            DependencyResult::Resolved(component) => component,
            DependencyResult::Constraint(_) => continue,
            DependencyResult::Unresolved { requested, reason } => {
                tracing::debug!("skipping unresolved `{}`: {}", requested, reason);
                continue;
            }
        };

        // TODO: check the selected variant of multi-variant components once
        // resolution results report it; today they are always listed.
        if component.is_platform() {
            tracing::debug!(
                "skipping platform `{}:{}` in `{}`",
                component.group,
                component.name,
                configuration.name()
            );
            continue;
        }

        let Some(module) = component.module_version() else {
            tracing::debug!(
                "skipping `{}:{}` without module version",
                component.group,
                component.name
            );
            continue;
        };

        match configuration
            .dependencies()
            .iter()
            .find(|d| d.matches_module(&module.group, &module.name))
        {
            Some(declared) => result.propagations.push(Propagation {
                from: configuration.name().to_string(),
                dependency: declared.clone(),
            }),
            None => tracing::warn!(
                "`{}:{}` resolved in `{}` but is not declared there; it will not be propagated",
                module.group,
                module.name,
                configuration.name()
            ),
        }

        result
            .descriptors
            .push(DependencyDescriptor::new(module.name, module.version, optional));
    }

    result
}

/// Descriptors for the declared dependencies of a configuration.
pub fn legacy_descriptors(configuration: &Configuration, optional: bool) -> Vec<DependencyDescriptor> {
    configuration
        .dependencies()
        .iter()
        .filter_map(|d| match d.version {
            Some(ref version) if !version.is_empty() => {
                Some(DependencyDescriptor::new(d.name.clone(), version.clone(), optional))
            }
            _ => {
                tracing::debug!("skipping `{}` without a declared version", d.name);
                None
            }
        })
        .collect()
}

/// List the declared dependencies of a configuration in attribute format.
pub fn legacy_list(configuration: &Configuration, optional: bool) -> String {
    format_dependencies(&legacy_descriptors(configuration, optional))
}

//! Manifest assembly.
//!
//! Runs the output guard, the dependency classifier and the dynamic-loading
//! detector over a [`PluginBuild`] and combines their results with the
//! project settings into the ordered attribute map of the plugin manifest.

use anyhow::Result;

use crate::core::attributes::{keys, ManifestAttributes, MANIFEST_FORMAT_VERSION};
use crate::core::build::PluginBuild;
use crate::core::conventions::Conventions;
use crate::core::extension::ResourceScope;
use crate::core::project::format_developers;
use crate::ops::classify::lister_for;
use crate::ops::dynamic_loading;
use crate::ops::output_guard::guard_outputs;
use crate::ops::version::{SnapshotVersionNormalizer, VersionNormalizer};

/// Options for manifest assembly.
pub struct ManifestOptions<'a> {
    /// Names and paths of the build layout
    pub conventions: Conventions,

    /// Turns the raw project version into the plugin version
    pub normalizer: Box<dyn VersionNormalizer + 'a>,

    /// Scope the output directories are layered over for extension lookup
    pub parent_scope: Option<&'a ResourceScope<'a>>,
}

impl Default for ManifestOptions<'_> {
    fn default() -> Self {
        ManifestOptions {
            conventions: Conventions::default(),
            normalizer: Box::new(SnapshotVersionNormalizer::from_env()),
            parent_scope: None,
        }
    }
}

/// Build the manifest attributes of a plugin.
///
/// Fails without producing any attributes, and without touching `build`,
/// if the output directories cannot be packaged together or an extension
/// index is malformed. On success, plugin dependencies found
/// in the resolved graphs are registered on the runtime-elements
/// configuration of `build`.
pub fn assemble_manifest(build: &mut PluginBuild, options: &ManifestOptions<'_>) -> Result<ManifestAttributes> {
    let conventions = &options.conventions;

    let plugin_class = guard_outputs(&build.output_dirs, conventions)?;

    let mut attrs = ManifestAttributes::new();
    attrs.put(keys::MANIFEST_VERSION, Some(MANIFEST_FORMAT_VERSION.to_string()));
    attrs.put(keys::PLUGIN_CLASS, plugin_class);

    let project = &build.project;
    attrs.put(keys::GROUP_ID, project.group.clone());
    attrs.put(keys::SHORT_NAME, project.short_name.clone());
    attrs.put(keys::LONG_NAME, project.display_name.clone());
    attrs.put(keys::URL, project.url.clone());
    attrs.put(keys::COMPATIBLE_SINCE_VERSION, project.compatible_since_version.clone());
    attrs.put(keys::SANDBOX_STATUS, project.sandbox_status.map(|s| s.to_string()));
    attrs.put(keys::EXTENSION_NAME, project.short_name.clone());
    attrs.put(
        keys::PLUGIN_VERSION,
        project.version.as_deref().map(|v| options.normalizer.normalize(v)),
    );
    attrs.put(keys::JENKINS_VERSION, project.core_version.clone());
    attrs.put(keys::MINIMUM_JAVA_VERSION, project.minimum_java_version.clone());
    attrs.put(keys::MASK_CLASSES, project.mask_classes.clone());

    let lister = lister_for(&build.host);
    tracing::info!(
        "listing plugin dependencies with the {} strategy (host {})",
        lister.name(),
        build.host
    );
    let classification = lister.list(&build.configurations, conventions);
    let dependencies = classification.to_attribute();
    if !dependencies.is_empty() {
        attrs.put(keys::PLUGIN_DEPENDENCIES, Some(dependencies));
    }

    if project.plugin_first_class_loader {
        attrs.put(keys::PLUGIN_FIRST_CLASS_LOADER, Some("true".to_string()));
    }

    let developers = format_developers(&project.developers);
    if !developers.is_empty() {
        attrs.put(keys::PLUGIN_DEVELOPERS, Some(developers));
    }

    let dynamic_loading = dynamic_loading::detect(
        &build.output_dirs,
        &conventions.extension_index,
        options.parent_scope,
    )?;
    if let Some(supported) = dynamic_loading.as_bool() {
        attrs.put(keys::SUPPORT_DYNAMIC_LOADING, Some(supported.to_string()));
    }

    // Only side effect on the build; nothing after this point can fail
    let propagated = build
        .configurations
        .apply_propagations(&conventions.runtime_elements, &classification.propagations);
    if propagated > 0 {
        tracing::debug!(
            "registered {} dependencies on `{}`",
            propagated,
            conventions.runtime_elements
        );
    }

    attrs.retain_non_empty();
    tracing::info!("assembled manifest with {} attributes", attrs.len());

    Ok(attrs)
}

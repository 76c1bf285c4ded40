//! Plugin project metadata.
//!
//! These values are already resolved by the build; the manifest copies them
//! through verbatim.

use serde::{Deserialize, Serialize};

/// A plugin developer entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl Developer {
    /// Render as `name:id:email`, keeping empty fields in place.
    pub fn to_manifest_entry(&self) -> String {
        format!(
            "{}:{}:{}",
            self.name.as_deref().unwrap_or(""),
            self.id.as_deref().unwrap_or(""),
            self.email.as_deref().unwrap_or("")
        )
    }
}

/// Format the developer list attribute. Empty when there are no developers.
pub fn format_developers(developers: &[Developer]) -> String {
    developers
        .iter()
        .map(Developer::to_manifest_entry)
        .collect::<Vec<_>>()
        .join(",")
}

/// Resolved plugin project settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PluginProject {
    /// Maven group of the plugin
    pub group: Option<String>,

    /// Raw project version, before normalization
    pub version: Option<String>,

    /// Plugin ID (also used as the extension name)
    pub short_name: Option<String>,

    /// Human readable name
    pub display_name: Option<String>,

    /// Plugin homepage
    pub url: Option<String>,

    /// Oldest plugin version whose configuration this version can read
    pub compatible_since_version: Option<String>,

    /// Whether the plugin was written with sandboxing in mind
    pub sandbox_status: Option<bool>,

    /// Minimum Jenkins core version
    pub core_version: Option<String>,

    /// Minimum Java version
    pub minimum_java_version: Option<String>,

    /// Space separated package prefixes hidden from the core class loader
    pub mask_classes: Option<String>,

    /// Load plugin classes before core classes
    pub plugin_first_class_loader: bool,

    pub developers: Vec<Developer>,
}

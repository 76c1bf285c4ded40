//! Snapshot of the plugin build handed to the manifest derivation.

use std::path::PathBuf;

use crate::core::configuration::ConfigurationSet;
use crate::core::host::HostVersion;
use crate::core::project::PluginProject;

/// Everything the build tool knows about the plugin at packaging time.
#[derive(Debug, Clone)]
pub struct PluginBuild {
    /// Version of the build tool
    pub host: HostVersion,

    /// Resolved project settings
    pub project: PluginProject,

    /// All configurations of the project
    pub configurations: ConfigurationSet,

    /// Compiled classes and generated resources, in classpath order
    pub output_dirs: Vec<PathBuf>,
}

impl PluginBuild {
    pub fn new(host: HostVersion, project: PluginProject) -> Self {
        PluginBuild {
            host,
            project,
            configurations: ConfigurationSet::new(),
            output_dirs: Vec::new(),
        }
    }

    pub fn with_configurations(mut self, configurations: ConfigurationSet) -> Self {
        self.configurations = configurations;
        self
    }

    pub fn with_output_dirs(mut self, output_dirs: Vec<PathBuf>) -> Self {
        self.output_dirs = output_dirs;
        self
    }
}

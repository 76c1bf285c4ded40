//! The ordered manifest attribute map.
//!
//! Attributes keep their first insertion position; re-inserting a key
//! replaces the value in place, matching how a JAR manifest's main section
//! behaves. Values may be absent while the map is being built, but
//! [`ManifestAttributes::retain_non_empty`] strips them before emission.

use std::fmt;

/// Well-known attribute keys, in the order the assembler writes them.
pub mod keys {
    pub const MANIFEST_VERSION: &str = "Manifest-Version";
    pub const PLUGIN_CLASS: &str = "Plugin-Class";
    pub const GROUP_ID: &str = "Group-Id";
    pub const SHORT_NAME: &str = "Short-Name";
    pub const LONG_NAME: &str = "Long-Name";
    pub const URL: &str = "Url";
    pub const COMPATIBLE_SINCE_VERSION: &str = "Compatible-Since-Version";
    pub const SANDBOX_STATUS: &str = "Sandbox-Status";
    pub const EXTENSION_NAME: &str = "Extension-Name";
    pub const PLUGIN_VERSION: &str = "Plugin-Version";
    pub const JENKINS_VERSION: &str = "Jenkins-Version";
    pub const MINIMUM_JAVA_VERSION: &str = "Minimum-Java-Version";
    pub const MASK_CLASSES: &str = "Mask-Classes";
    pub const PLUGIN_DEPENDENCIES: &str = "Plugin-Dependencies";
    pub const PLUGIN_FIRST_CLASS_LOADER: &str = "PluginFirstClassLoader";
    pub const PLUGIN_DEVELOPERS: &str = "Plugin-Developers";
    pub const SUPPORT_DYNAMIC_LOADING: &str = "Support-Dynamic-Loading";
}

/// Manifest format version written into every manifest.
pub const MANIFEST_FORMAT_VERSION: &str = "1.0";

/// Ordered mapping from attribute name to an optional value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestAttributes {
    entries: Vec<(String, Option<String>)>,
}

impl ManifestAttributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        ManifestAttributes {
            entries: Vec::new(),
        }
    }

    /// Set an attribute, keeping the original position if it already exists.
    pub fn put<V>(&mut self, key: impl Into<String>, value: V)
    where
        V: Into<Option<String>>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the value of an attribute, if present and set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Check whether an attribute key is present (even with an empty value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        self.entries.remove(idx).1
    }

    /// Drop every attribute whose value is absent or the empty string.
    pub fn retain_non_empty(&mut self) {
        self.entries
            .retain(|(_, v)| v.as_deref().is_some_and(|v| !v.is_empty()));
    }

    /// Iterate over attributes that carry a value, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Attribute keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of attributes, including unset ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ManifestAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_replaces_in_place() {
        let mut attrs = ManifestAttributes::new();
        attrs.put("A", Some("1".to_string()));
        attrs.put("B", Some("2".to_string()));
        attrs.put("A", Some("3".to_string()));

        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(attrs.get("A"), Some("3"));
    }

    #[test]
    fn test_retain_non_empty() {
        let mut attrs = ManifestAttributes::new();
        attrs.put(keys::URL, None);
        attrs.put(keys::SHORT_NAME, Some(String::new()));
        attrs.put(keys::GROUP_ID, Some("org.example".to_string()));

        attrs.retain_non_empty();

        assert_eq!(attrs.len(), 1);
        assert!(!attrs.contains_key(keys::URL));
        assert!(!attrs.contains_key(keys::SHORT_NAME));
        assert_eq!(attrs.get(keys::GROUP_ID), Some("org.example"));
    }

    #[test]
    fn test_display_skips_unset() {
        let mut attrs = ManifestAttributes::new();
        attrs.put(keys::MANIFEST_VERSION, Some(MANIFEST_FORMAT_VERSION.to_string()));
        attrs.put(keys::URL, None);

        assert_eq!(attrs.to_string(), "Manifest-Version: 1.0\n");
    }
}

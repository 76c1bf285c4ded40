//! Plugin version normalization.

use std::time::{SystemTime, UNIX_EPOCH};

/// Suffix of development versions.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Turns the raw project version into the `Plugin-Version` value.
pub trait VersionNormalizer {
    fn normalize(&self, raw: &str) -> String;
}

/// Marks snapshot builds as private builds of a given user.
///
/// `1.2-SNAPSHOT` becomes `1.2-SNAPSHOT (private-<stamp>-<user>)` so that a
/// locally built plugin is never mistaken for a released one. Release
/// versions pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotVersionNormalizer {
    stamp: String,
    user: String,
}

impl SnapshotVersionNormalizer {
    pub fn new(stamp: impl Into<String>, user: impl Into<String>) -> Self {
        SnapshotVersionNormalizer {
            stamp: stamp.into(),
            user: user.into(),
        }
    }

    /// Stamp the build with the current time and the user from the environment.
    pub fn from_env() -> Self {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs().to_string())
            .unwrap_or_else(|_| "0".to_string());
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        SnapshotVersionNormalizer::new(stamp, user)
    }
}

impl VersionNormalizer for SnapshotVersionNormalizer {
    fn normalize(&self, raw: &str) -> String {
        if raw.ends_with(SNAPSHOT_SUFFIX) {
            format!("{} (private-{}-{})", raw, self.stamp, self.user)
        } else {
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_version_unchanged() {
        let normalizer = SnapshotVersionNormalizer::new("1700000000", "jdoe");
        assert_eq!(normalizer.normalize("1.2.3"), "1.2.3");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_snapshot_version_is_stamped() {
        let normalizer = SnapshotVersionNormalizer::new("1700000000", "jdoe");
        assert_eq!(
            normalizer.normalize("1.2-SNAPSHOT"),
            "1.2-SNAPSHOT (private-1700000000-jdoe)"
        );
    }
}

//! Host build-tool version and the capabilities it implies.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use semver::Version;

/// First host version able to report resolved dependency graphs with
/// variant information.
pub const RESOLVED_GRAPH_SINCE: Version = Version::new(5, 3, 0);

/// Version of the build tool driving the manifest generation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HostVersion {
    version: Version,
    raw: String,
}

impl HostVersion {
    /// Parse a host version.
    ///
    /// Host versions are often not strict semver (`5.3`, `7.6.1`,
    /// `8.0-rc-1`), so missing minor/patch components are padded with zero
    /// and anything after the first `-` is treated as a pre-release tag.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("host version must not be empty");
        }

        let (numbers, pre) = match raw.split_once('-') {
            Some((numbers, pre)) => (numbers, Some(pre)),
            None => (raw, None),
        };

        let mut parts = numbers.split('.');
        let mut next = |what: &str| -> Result<u64> {
            match parts.next() {
                Some(p) => p
                    .parse::<u64>()
                    .with_context(|| format!("invalid {} component in host version `{}`", what, raw)),
                None => Ok(0),
            }
        };
        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;
        if parts.next().is_some() {
            bail!("host version `{}` has too many components", raw);
        }

        let mut version = Version::new(major, minor, patch);
        if let Some(pre) = pre {
            version.pre = semver::Prerelease::new(&pre.replace('-', "."))
                .with_context(|| format!("invalid pre-release tag in host version `{}`", raw))?;
        }

        Ok(HostVersion {
            version,
            raw: raw.to_string(),
        })
    }

    /// The normalized semantic version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check whether this host is at least `minimum`, ignoring pre-release tags.
    ///
    /// A `5.3-rc-1` host already ships the 5.3 APIs.
    pub fn is_at_least(&self, minimum: &Version) -> bool {
        let release = Version::new(self.version.major, self.version.minor, self.version.patch);
        release >= *minimum
    }

    /// Check whether the host reports resolved dependency graphs.
    pub fn supports_resolved_graphs(&self) -> bool {
        self.is_at_least(&RESOLVED_GRAPH_SINCE)
    }
}

impl FromStr for HostVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        HostVersion::parse(s)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_versions() {
        let v = HostVersion::parse("5.3").unwrap();
        assert_eq!(v.version(), &Version::new(5, 3, 0));
        assert_eq!(v.to_string(), "5.3");

        let v: HostVersion = "7.6.1".parse().unwrap();
        assert_eq!(v.version(), &Version::new(7, 6, 1));

        let v = HostVersion::parse("8").unwrap();
        assert_eq!(v.version(), &Version::new(8, 0, 0));
    }

    #[test]
    fn test_parse_prerelease() {
        let v = HostVersion::parse("8.0-rc-1").unwrap();
        assert_eq!(v.version().pre.as_str(), "rc.1");
        assert!(v.is_at_least(&Version::new(8, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(HostVersion::parse("").is_err());
        assert!(HostVersion::parse("five").is_err());
        assert!(HostVersion::parse("1.2.3.4").is_err());
    }

    #[test]
    fn test_resolved_graph_threshold() {
        assert!(!HostVersion::parse("4.10.3").unwrap().supports_resolved_graphs());
        assert!(!HostVersion::parse("5.2.1").unwrap().supports_resolved_graphs());
        assert!(HostVersion::parse("5.3").unwrap().supports_resolved_graphs());
        assert!(HostVersion::parse("5.3-rc-2").unwrap().supports_resolved_graphs());
        assert!(HostVersion::parse("6.0").unwrap().supports_resolved_graphs());
    }
}

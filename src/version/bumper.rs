//! Semantic version bump selection.

use crate::error::VersionError;
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Requested version change for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionBump {
    /// Increment major, reset minor and patch
    Major,
    /// Increment minor, reset patch
    Minor,
    /// Increment patch
    Patch,
    /// Use this exact version
    Exact(Version),
}

impl VersionBump {
    /// Whether the bump needs the current version to compute the next one
    pub fn is_relative(&self) -> bool {
        !matches!(self, VersionBump::Exact(_))
    }

    /// Next version after `current`. Pre-release and build metadata are cleared.
    ///
    /// A pre-release of exactly the requested kind is released as is, the way npm
    /// does: `2.0.0-rc.1` major gives `2.0.0`, `1.3.0-rc.1` minor gives `1.3.0`,
    /// `1.2.3-rc.1` patch gives `1.2.3`. Any other current version is incremented.
    pub fn apply(&self, current: &Version) -> Version {
        let pre = !current.pre.is_empty();
        let (major, minor, patch) = (current.major, current.minor, current.patch);

        match self {
            VersionBump::Major if pre && minor == 0 && patch == 0 => Version::new(major, 0, 0),
            VersionBump::Major => Version::new(major + 1, 0, 0),
            VersionBump::Minor if pre && patch == 0 => Version::new(major, minor, 0),
            VersionBump::Minor => Version::new(major, minor + 1, 0),
            VersionBump::Patch if pre => Version::new(major, minor, patch),
            VersionBump::Patch => Version::new(major, minor, patch + 1),
            VersionBump::Exact(version) => version.clone(),
        }
    }
}

impl FromStr for VersionBump {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(VersionError::InvalidVersion {
                version: s.to_string(),
                reason: "expected major, minor, patch or an explicit version".to_string(),
            }),
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            _ => {
                let raw = s.trim();
                let raw = raw.strip_prefix('v').unwrap_or(raw);
                Version::parse(raw)
                    .map(VersionBump::Exact)
                    .map_err(|source| VersionError::ParseFailed {
                        version: s.to_string(),
                        source,
                    })
            }
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
            VersionBump::Exact(version) => write!(f, "{}", version),
        }
    }
}

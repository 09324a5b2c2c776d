//! Release configuration loaded from `.releaserc.toml`.
//!
//! Lookup order: the working directory, then the user's home directory, then
//! built-in defaults. Command line flags are applied on top by the CLI.

use crate::error::{ConfigError, Result};
use crate::git::DEFAULT_GIT_BINARY;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name searched for in the working and home directories
pub const RC_FILE_NAME: &str = ".releaserc.toml";

/// Options controlling a release run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Executable used for every git command
    pub git_binary: String,
    /// Commit message label; `%s` is replaced by the version
    pub commit_message: Option<String>,
    /// Tag label; `%s` is replaced by the version
    pub tag_message: Option<String>,
    /// JSON manifests whose `version` is bumped and staged
    pub files: Vec<PathBuf>,
    /// Create the release commit
    pub commit: bool,
    /// Create the release tag
    pub tag: bool,
    /// Push after committing and tagging
    pub push: bool,
    /// Push tags along with commits
    pub push_tags: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            git_binary: DEFAULT_GIT_BINARY.to_string(),
            commit_message: None,
            tag_message: None,
            files: vec![PathBuf::from("package.json")],
            commit: true,
            tag: true,
            push: false,
            push_tags: true,
        }
    }
}

impl ReleaseConfig {
    /// Load the rc file for `cwd`, falling back to the home directory and then defaults
    pub fn load(cwd: &Path) -> Result<Self> {
        let home = dirs::home_dir().map(|home| home.join(RC_FILE_NAME));
        Self::load_from_candidates(std::iter::once(cwd.join(RC_FILE_NAME)).chain(home))
    }

    fn load_from_candidates(candidates: impl IntoIterator<Item = PathBuf>) -> Result<Self> {
        for candidate in candidates {
            if candidate.is_file() {
                log::debug!("Loading config from {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        log::debug!("No {} found, using defaults", RC_FILE_NAME);
        Ok(Self::default())
    }

    /// Load a specific rc file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Parse rc file content; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }
}

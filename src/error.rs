//! Error types for release_tagger operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release_tagger operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release_tagger operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Git command errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Version management errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Release workflow precondition errors
    #[error("Release error: {0}")]
    Workflow(#[from] WorkflowError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the git command layer.
///
/// `NoBranch`, `NoRemote` and `MultipleRemote` carry a fixed message only.
#[derive(Error, Debug)]
pub enum GitError {
    /// The external command exited non-zero or could not be spawned
    #[error("Command `{command}` failed: {reason}")]
    Process {
        /// Command line that was executed
        command: String,
        /// Exit status and captured stderr, or the spawn error
        reason: String,
    },

    /// Current branch could not be resolved
    #[error("No branch Git seems to be declared")]
    NoBranch,

    /// Repository has no remote
    #[error("No remote Git seems to be declared")]
    NoRemote,

    /// Repository has more than one remote
    #[error("Multiple remote Git have been detected")]
    MultipleRemote,
}

/// Version management errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Invalid version or bump keyword
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion {
        /// Version string
        version: String,
        /// Reason for the error
        reason: String,
    },

    /// Version parsing failed
    #[error("Failed to parse version '{version}': {source}")]
    ParseFailed {
        /// Version string
        version: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },

    /// Manifest has no usable "version" property
    #[error("No \"version\" property found in {path}")]
    MissingVersion {
        /// Manifest path
        path: PathBuf,
    },

    /// Failed to read a manifest
    #[error("Failed to read manifest {path}: {reason}")]
    ManifestReadFailed {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Failed to write a manifest
    #[error("Failed to write manifest {path}: {reason}")]
    ManifestWriteFailed {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// rc file exists but could not be read
    #[error("Failed to read config file {path}: {reason}")]
    ReadFailed {
        /// Config file path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// rc file is not valid TOML or has unknown keys
    #[error("Invalid config file {path}: {source}")]
    Invalid {
        /// Config file path
        path: PathBuf,
        /// Parsing error
        #[source]
        source: toml::de::Error,
    },
}

/// Release workflow precondition errors
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The git binary could not be executed
    #[error("Git does not appear to be installed (`{binary} --help` failed)")]
    GitNotInstalled {
        /// Binary that was probed
        binary: String,
    },

    /// The working directory is not inside a working tree
    #[error("Not a git repository. Please initialize git first.")]
    NotRepository,

    /// A relative bump was requested without any manifest to read the current version from
    #[error(
        "Cannot compute a '{bump}' bump without a manifest file. \
         Pass --file or an explicit version."
    )]
    NoManifest {
        /// Requested bump
        bump: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Git(GitError::NoBranch) => vec![
                "Create an initial commit so HEAD points at a branch".to_string(),
                "Check out a branch instead of a detached HEAD: git checkout <branch>".to_string(),
            ],
            ReleaseError::Git(GitError::NoRemote) => vec![
                "Add a remote: git remote add origin <url>".to_string(),
                "Or release without --push".to_string(),
            ],
            ReleaseError::Git(GitError::MultipleRemote) => vec![
                "List the configured remotes: git remote -v".to_string(),
                "Remove the remotes you do not release to: git remote remove <name>".to_string(),
            ],
            ReleaseError::Git(GitError::Process { .. }) => vec![
                "Run the failing command by hand to see the full git output".to_string(),
                "Set RUST_LOG=debug to log every command line".to_string(),
            ],
            ReleaseError::Workflow(WorkflowError::GitNotInstalled { .. }) => vec![
                "Install git and make sure it is on your PATH".to_string(),
                "Or point git_binary in .releaserc.toml at the executable".to_string(),
            ],
            ReleaseError::Workflow(WorkflowError::NotRepository) => vec![
                "Navigate to a directory inside a git working tree".to_string(),
                "Or pass --cwd <path>".to_string(),
            ],
            ReleaseError::Cli(CliError::InvalidArguments { .. }) => vec![
                "Run with --help to see the accepted arguments".to_string(),
            ],
            ReleaseError::Version(VersionError::MissingVersion { .. }) => vec![
                "Add a \"version\" property to the manifest".to_string(),
                "Or pass an explicit version instead of major/minor/patch".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ReleaseError::Workflow(WorkflowError::GitNotInstalled { .. })
                | ReleaseError::Workflow(WorkflowError::NotRepository)
                | ReleaseError::Version(VersionError::InvalidVersion { .. })
                | ReleaseError::Git(GitError::MultipleRemote)
        )
    }
}

//! Command line argument parsing and validation.

use crate::config::ReleaseConfig;
use crate::version::VersionBump;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Release tagging helper driving the git command line
#[derive(Parser, Debug)]
#[command(
    name = "release_tagger",
    version,
    about = "Bump a manifest version, then commit, tag and push it with git",
    long_about = "Bump a manifest version, then commit, tag and push it with git.

Usage:
  release_tagger release patch
  release_tagger release 2.0.0 --push
  release_tagger release minor --file package.json --file bower.json --dry-run
  release_tagger info
  release_tagger label 1.2.3 --tag-message 'release-%s'

Defaults are read from .releaserc.toml in the working directory or your home directory."
)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bump manifests, commit, tag and optionally push
    Release {
        /// major, minor, patch or an explicit version such as 1.2.3
        #[arg(value_name = "VERSION")]
        bump: VersionBump,

        /// Release options overriding .releaserc.toml
        #[command(flatten)]
        options: ReleaseOptions,

        /// Print what would happen without writing files or running git actions
        #[arg(long)]
        dry_run: bool,
    },

    /// Show git availability, branch, remote and upstream tracking
    Info {
        /// Repository directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,

        /// Git executable
        #[arg(long, env = "RELEASE_TAGGER_GIT", value_name = "PATH")]
        git_binary: Option<String>,
    },

    /// Print the commit message and tag name for a version
    Label {
        /// Version substituted for %s
        version: String,

        /// Commit message label
        #[arg(long)]
        commit_message: Option<String>,

        /// Tag label
        #[arg(long)]
        tag_message: Option<String>,
    },
}

impl Command {
    /// Subcommand name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Release { .. } => "release",
            Command::Info { .. } => "info",
            Command::Label { .. } => "label",
        }
    }
}

/// Flags of the `release` subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ReleaseOptions {
    /// Repository directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Manifest whose version is bumped; repeat for several files
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Commit message label, %s is replaced by the version
    #[arg(long)]
    pub commit_message: Option<String>,

    /// Tag label, %s is replaced by the version
    #[arg(long)]
    pub tag_message: Option<String>,

    /// Do not create the release commit
    #[arg(long)]
    pub no_commit: bool,

    /// Do not create the release tag
    #[arg(long)]
    pub no_tag: bool,

    /// Push commits (and tags) after tagging
    #[arg(long)]
    pub push: bool,

    /// Push commits only
    #[arg(long)]
    pub no_push_tags: bool,

    /// Git executable
    #[arg(long, env = "RELEASE_TAGGER_GIT", value_name = "PATH")]
    pub git_binary: Option<String>,
}

impl ReleaseOptions {
    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut ReleaseConfig) {
        if !self.files.is_empty() {
            config.files = self.files.clone();
        }
        if let Some(label) = &self.commit_message {
            config.commit_message = Some(label.clone());
        }
        if let Some(label) = &self.tag_message {
            config.tag_message = Some(label.clone());
        }
        if let Some(binary) = &self.git_binary {
            config.git_binary = binary.clone();
        }
        if self.no_commit {
            config.commit = false;
        }
        if self.no_tag {
            config.tag = false;
        }
        if self.push {
            config.push = true;
        }
        if self.no_push_tags {
            config.push_tags = false;
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Release { options, .. } => {
                if options.no_push_tags && !options.push {
                    return Err("--no-push-tags only makes sense together with --push".to_string());
                }
                if options.git_binary.as_deref().is_some_and(|b| b.trim().is_empty()) {
                    return Err("--git-binary cannot be empty".to_string());
                }
                Ok(())
            }
            Command::Label { version, .. } if version.trim().is_empty() => {
                Err("Version cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.quiet)
    }
}

//! # Release Tagger
//!
//! Release tagging for projects versioned through a JSON manifest, driven by the
//! git command line.
//!
//! This crate bumps the `version` of one or more manifests, stages them, creates
//! the release commit and tag, and optionally pushes (setting upstream tracking for
//! the current branch when it has none).
//!
//! ## Features
//!
//! - **Git CLI facade**: typed operations over `git` command lines with typed errors
//! - **Probes**: installation, repository and upstream checks that never fail
//! - **Label templates**: `%s` substitution for commit messages and tag names
//! - **Dry runs**: report every step without touching files or git
//!
//! ## Usage
//!
//! ```bash
//! release_tagger release patch            # 1.2.3 -> 1.2.4, commit and tag
//! release_tagger release 2.0.0 --push     # explicit version, push with tags
//! release_tagger info                     # branch, remote and upstream status
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod release;
pub mod version;

// Re-export main types for public API
pub use cli::Args;
pub use config::ReleaseConfig;
pub use error::{GitError, ReleaseError, Result};
pub use git::{CommandRunner, GitRelease, ShellRunner, create_commit_label, create_tag_label};
pub use release::{ReleaseOutcome, ReleaseWorkflow};
pub use version::VersionBump;

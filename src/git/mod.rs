//! Git integration for release workflows.
//!
//! This module drives the git command line: a process runner executes command
//! lines and the release operations facade builds them and interprets the output.

mod operations;
mod runner;
#[cfg(test)]
pub(crate) mod scripted;

pub use operations::{DEFAULT_GIT_BINARY, GitRelease, create_commit_label, create_tag_label};
pub use runner::{CommandRunner, ShellRunner, split_lines};

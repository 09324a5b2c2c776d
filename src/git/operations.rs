//! Release operations built on top of the git command line.
//!
//! Every operation builds one command line, hands it to a [`CommandRunner`] and
//! interprets the output. Operations come in three flavours:
//!
//! - **actions** (`add_file`, `create_commit`, `create_tag`, `push`, `upstream_branch`)
//!   propagate [`GitError::Process`] unchanged;
//! - **queries** (`branch_name`, `remote_name_list`, `remote_name`) turn empty or
//!   ambiguous output into typed errors;
//! - **probes** (`has_git_installed`, `has_git_project`, `is_branch_upstream`,
//!   `is_current_branch_upstream`) return a plain `bool` and never fail.

use super::runner::{CommandRunner, ShellRunner, split_lines};
use crate::error::GitError;
use std::path::Path;

/// Default executable name for the version-control binary
pub const DEFAULT_GIT_BINARY: &str = "git";

/// Stateless facade over the git CLI for release tagging
#[derive(Debug, Clone)]
pub struct GitRelease<R = ShellRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> GitRelease<R> {
    /// Create a facade invoking `git` through `runner`
    pub fn new(runner: R) -> Self {
        Self::with_binary(runner, DEFAULT_GIT_BINARY)
    }

    /// Create a facade invoking a custom git executable
    pub fn with_binary(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    /// Executable used for every command line
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Underlying process runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn command(&self, args: &str) -> String {
        format!("{} {}", self.binary, args)
    }

    /// Stage `file_path`
    pub async fn add_file(&self, file_path: &str, cwd: Option<&Path>) -> Result<(), GitError> {
        let command = self.command(&format!("add {}", file_path));
        self.runner.run(&command, false, cwd).await?;
        Ok(())
    }

    /// Commit all tracked changes with the release commit label
    pub async fn create_commit(
        &self,
        version: &str,
        label: Option<&str>,
        cwd: Option<&Path>,
    ) -> Result<(), GitError> {
        let command = self.command(&format!(
            "commit --all --message \"{}\"",
            create_commit_label(version, label)
        ));
        self.runner.run(&command, false, cwd).await?;
        Ok(())
    }

    /// Tag HEAD with the release tag label
    pub async fn create_tag(
        &self,
        version: &str,
        label: Option<&str>,
        cwd: Option<&Path>,
    ) -> Result<(), GitError> {
        let command = self.command(&format!("tag \"{}\"", create_tag_label(version, label)));
        self.runner.run(&command, false, cwd).await?;
        Ok(())
    }

    /// Whether the git binary can be executed at all
    pub async fn has_git_installed(&self) -> bool {
        self.probe(&self.command("--help"), None).await
    }

    /// Whether `cwd` lies inside a git working tree
    pub async fn has_git_project(&self, cwd: Option<&Path>) -> bool {
        self.probe(&self.command("status --porcelain"), cwd).await
    }

    async fn probe(&self, command: &str, cwd: Option<&Path>) -> bool {
        match self.runner.run(command, true, cwd).await {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Probe `{}` failed: {}", command, e);
                false
            }
        }
    }

    /// Name of the checked-out branch
    pub async fn branch_name(&self, cwd: Option<&Path>) -> Result<String, GitError> {
        let output = self
            .runner
            .run(&self.command("rev-parse --abbrev-ref HEAD"), true, cwd)
            .await?;

        if output.is_empty() {
            return Err(GitError::NoBranch);
        }
        Ok(output)
    }

    /// Configured remotes in the order git lists them.
    ///
    /// Runs `git remote`, one name per line. A `git origin` listing is sometimes
    /// documented for this, but git has no such subcommand.
    pub async fn remote_name_list(&self, cwd: Option<&Path>) -> Result<Vec<String>, GitError> {
        let output = self.runner.run(&self.command("remote"), true, cwd).await?;
        Ok(split_lines(&output))
    }

    /// The single configured remote
    pub async fn remote_name(&self, cwd: Option<&Path>) -> Result<String, GitError> {
        let mut remotes = self.remote_name_list(cwd).await?;

        match remotes.len() {
            0 => Err(GitError::NoRemote),
            1 => Ok(remotes.remove(0)),
            _ => Err(GitError::MultipleRemote),
        }
    }

    /// Whether the checked-out branch has a remote counterpart
    pub async fn is_current_branch_upstream(&self, cwd: Option<&Path>) -> bool {
        match self.branch_name(cwd).await {
            Ok(branch) => self.is_branch_upstream(&branch, cwd).await,
            Err(e) => {
                log::debug!("Upstream check skipped: {}", e);
                false
            }
        }
    }

    /// Whether `branch_name` appears in the remote branch listing of the single remote.
    ///
    /// The listing and the remote lookup run concurrently; any failure yields `false`.
    pub async fn is_branch_upstream(&self, branch_name: &str, cwd: Option<&Path>) -> bool {
        let listing_command = self.command("branch -rvv");
        let (listing, remote) = tokio::join!(
            self.runner.run(&listing_command, true, cwd),
            self.remote_name(cwd),
        );

        match (listing, remote) {
            (Ok(listing), Ok(remote)) => {
                let remote_branch = format!("{}/{}", remote, branch_name);
                split_lines(&listing)
                    .iter()
                    .any(|line| line.contains(&remote_branch))
            }
            (Err(e), _) | (_, Err(e)) => {
                log::debug!("Upstream check for '{}' failed: {}", branch_name, e);
                false
            }
        }
    }

    /// Push commits, and tags as a chained second push when `include_tags` is set
    pub async fn push(&self, include_tags: bool, cwd: Option<&Path>) -> Result<(), GitError> {
        let mut command = self.command("push");
        if include_tags {
            command = format!("{} && {}", command, self.command("push --tags"));
        }
        self.runner.run(&command, false, cwd).await?;
        Ok(())
    }

    /// Push `branch_name` to `remote_name` and record it as upstream
    pub async fn upstream_branch(
        &self,
        remote_name: &str,
        branch_name: &str,
        cwd: Option<&Path>,
    ) -> Result<(), GitError> {
        let command = self.command(&format!("push --set-upstream {} {}", remote_name, branch_name));
        self.runner.run(&command, false, cwd).await?;
        Ok(())
    }

    /// Set upstream tracking for the checked-out branch on the single remote
    pub async fn upstream_current_branch(&self, cwd: Option<&Path>) -> Result<(), GitError> {
        let (remote, branch) = tokio::try_join!(self.remote_name(cwd), self.branch_name(cwd))?;
        self.upstream_branch(&remote, &branch, cwd).await
    }
}

/// Commit message for `version`: `label` with `%s` substituted, or `Release version: {version}`
pub fn create_commit_label(version: &str, label: Option<&str>) -> String {
    match label.filter(|label| !label.is_empty()) {
        Some(label) => render_label(label, version),
        None => format!("Release version: {}", version),
    }
}

/// Tag name for `version`: `label` with `%s` substituted, or `v{version}`
pub fn create_tag_label(version: &str, label: Option<&str>) -> String {
    match label.filter(|label| !label.is_empty()) {
        Some(label) => render_label(label, version),
        None => format!("v{}", version),
    }
}

// Substitution runs before escaping so quotes around `%s` are escaped too.
fn render_label(label: &str, version: &str) -> String {
    label.replace("%s", version).replace('"', "\\\"")
}

//! Info command implementation.
//!
//! Reports what the release command would detect about the repository.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::git::{DEFAULT_GIT_BINARY, GitRelease, ShellRunner};

/// Execute info command
pub(super) async fn execute_info(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Info { cwd, git_binary } = &args.command else {
        unreachable!("execute_info called with non-Info command");
    };

    let cwd = super::existing_dir(cwd.as_deref())?;
    let git = GitRelease::with_binary(
        ShellRunner::new(config.output().clone()),
        git_binary.as_deref().unwrap_or(DEFAULT_GIT_BINARY),
    );

    let _ = config.output().section("Repository");

    if !git.has_git_installed().await {
        config.warning_println(&format!("{} is not installed", git.binary()));
        return Ok(());
    }
    config.success_println(&format!("{} is installed", git.binary()));

    if !git.has_git_project(cwd).await {
        config.warning_println("Not inside a git working tree");
        return Ok(());
    }
    config.success_println("Inside a git working tree");

    let output = config.output();
    match git.branch_name(cwd).await {
        Ok(branch) => {
            let _ = output.info(&format!("Branch: {}", branch));
        }
        Err(e) => config.warning_println(&e.to_string()),
    }

    match git.remote_name_list(cwd).await {
        Ok(remotes) if remotes.is_empty() => {
            let _ = output.info("Remotes: none");
        }
        Ok(remotes) => {
            let _ = output.info(&format!("Remotes: {}", remotes.join(", ")));
        }
        Err(e) => config.warning_println(&e.to_string()),
    }

    match git.remote_name(cwd).await {
        Ok(remote) => {
            let _ = output.info(&format!("Release remote: {}", remote));
        }
        Err(e) => config.warning_println(&e.to_string()),
    }

    if git.is_current_branch_upstream(cwd).await {
        config.success_println("Current branch tracks its remote");
    } else {
        config.warning_println("Current branch has no upstream; release --push will set it");
    }

    Ok(())
}

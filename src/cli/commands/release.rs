//! Release command implementation.
//!
//! Loads `.releaserc.toml`, applies the command line flags and runs the release workflow.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::config::ReleaseConfig;
use crate::error::Result;
use crate::git::{GitRelease, ShellRunner};
use crate::release::ReleaseWorkflow;

/// Execute release command
pub(super) async fn execute_release(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Release {
        bump,
        options,
        dry_run,
    } = &args.command
    else {
        unreachable!("execute_release called with non-Release command");
    };

    let cwd = super::existing_dir(options.cwd.as_deref())?;
    let rc_dir = match cwd {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let mut release_config = ReleaseConfig::load(&rc_dir)?;
    options.apply(&mut release_config);
    log::debug!("Effective release config: {:?}", release_config);

    let git = GitRelease::with_binary(
        ShellRunner::new(config.output().clone()),
        release_config.git_binary.clone(),
    );

    let outcome = ReleaseWorkflow::new(&git, &release_config, cwd, config.output())
        .dry_run(*dry_run)
        .run(bump)
        .await?;

    if outcome.dry_run {
        config.println(&format!("Dry run complete, nothing was changed for {}", outcome.version));
    } else {
        config.success_println(&format!("Released {}", outcome.version));
    }

    if !outcome.files.is_empty() {
        config.indent(&format!(
            "Files: {}",
            outcome
                .files
                .iter()
                .map(|f| f.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if let Some(tag) = &outcome.tag_label {
        config.indent(&format!("Tag: {}", tag));
    }
    if !outcome.pushed && !release_config.push {
        config.indent("Not pushed (use --push)");
    }

    Ok(())
}

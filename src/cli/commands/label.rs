//! Label command implementation.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::git::{create_commit_label, create_tag_label};

/// Execute label command. Labels go to stdout even in quiet mode so scripts can capture them.
pub(super) async fn execute_label(args: &Args, _config: &RuntimeConfig) -> Result<()> {
    let Command::Label {
        version,
        commit_message,
        tag_message,
    } = &args.command
    else {
        unreachable!("execute_label called with non-Label command");
    };

    println!("commit: {}", create_commit_label(version, commit_message.as_deref()));
    println!("tag: {}", create_tag_label(version, tag_message.as_deref()));

    Ok(())
}

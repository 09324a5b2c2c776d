//! Process runner executing git command lines through the platform shell.
//!
//! The [`CommandRunner`] trait is the seam between the release operations and the
//! operating system; [`ShellRunner`] is the implementation used by the binary.

use crate::cli::OutputManager;
use crate::error::GitError;
use std::future::Future;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Executes a command line and captures its standard output
pub trait CommandRunner {
    /// Run `command` as a single shell invocation.
    ///
    /// `cwd` is handed to the child process untouched; `None` inherits the current
    /// directory. Resolves with stdout minus one trailing line terminator. When
    /// `silent` is false, stdout and stderr are also echoed to the console.
    fn run(
        &self,
        command: &str,
        silent: bool,
        cwd: Option<&Path>,
    ) -> impl Future<Output = Result<String, GitError>>;
}

/// Runs command lines with `sh -c` (`cmd /C` on Windows)
#[derive(Debug, Clone)]
pub struct ShellRunner {
    output: OutputManager,
}

impl ShellRunner {
    /// Create a runner echoing non-silent output through `output`
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }

    #[cfg(windows)]
    fn shell_command(command: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }

    #[cfg(not(windows))]
    fn shell_command(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(OutputManager::new(false))
    }
}

impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        command: &str,
        silent: bool,
        cwd: Option<&Path>,
    ) -> Result<String, GitError> {
        log::debug!("Running `{}` (cwd: {:?}, silent: {})", command, cwd, silent);

        let mut cmd = Self::shell_command(command);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GitError::Process {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let echo = (!silent).then_some(&self.output);
        let (stdout, stderr) = tokio::join!(
            collect_stream(child.stdout.take(), echo, Stream::Stdout),
            collect_stream(child.stderr.take(), echo, Stream::Stderr),
        );

        let status = child.wait().await.map_err(|e| GitError::Process {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let stdout = stdout.map_err(|e| GitError::Process {
            command: command.to_string(),
            reason: format!("Failed to read stdout: {}", e),
        })?;

        if !status.success() {
            let stderr = stderr.unwrap_or_default();
            log::debug!("`{}` exited with {}", command, status);
            return Err(GitError::Process {
                command: command.to_string(),
                reason: failure_reason(status, &stderr),
            });
        }

        Ok(trim_line_terminator(stdout))
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Read a child pipe to the end, echoing each line when an output manager is given
async fn collect_stream<R>(
    pipe: Option<R>,
    echo: Option<&OutputManager>,
    stream: Stream,
) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let Some(pipe) = pipe else {
        return Ok(String::new());
    };

    let mut reader = BufReader::new(pipe);
    let mut captured = String::new();
    let mut chunk = Vec::new();

    loop {
        chunk.clear();
        if reader.read_until(b'\n', &mut chunk).await? == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&chunk);
        if let Some(output) = echo {
            let line = text.trim_end_matches(['\r', '\n']);
            let _ = match stream {
                Stream::Stdout => output.indent(line),
                Stream::Stderr => output.stderr_line(line),
            };
        }
        captured.push_str(&text);
    }

    Ok(captured)
}

fn failure_reason(status: ExitStatus, stderr: &str) -> String {
    let code = status
        .code()
        .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit code {}", code));
    let stderr = stderr.trim();

    if stderr.is_empty() {
        code
    } else {
        format!("{}: {}", code, stderr)
    }
}

/// Remove exactly one trailing `\n` or `\r\n`
pub(crate) fn trim_line_terminator(mut output: String) -> String {
    if output.ends_with('\n') {
        output.pop();
        if output.ends_with('\r') {
            output.pop();
        }
    }
    output
}

/// Split command output into lines.
///
/// Only the empty entry left by a trailing terminator is dropped; blank lines in
/// the middle of the output are kept.
pub fn split_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
}

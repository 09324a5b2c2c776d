//! Scripted [`CommandRunner`] recording every invocation, for unit tests.

use super::CommandRunner;
use crate::error::GitError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded call to [`CommandRunner::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub command: String,
    pub silent: bool,
    pub cwd: Option<PathBuf>,
}

/// Answers commands from a fixed script; unscripted commands succeed with empty output
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    responses: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(mut self, command: &str, output: &str) -> Self {
        self.responses
            .insert(command.to_string(), Ok(output.to_string()));
        self
    }

    pub fn fail(mut self, command: &str, reason: &str) -> Self {
        self.responses
            .insert(command.to_string(), Err(reason.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.command).collect()
    }

    pub fn was_called_with(&self, command: &str, silent: bool, cwd: Option<&Path>) -> bool {
        let expected = Invocation {
            command: command.to_string(),
            silent,
            cwd: cwd.map(Path::to_path_buf),
        };
        self.calls().contains(&expected)
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        command: &str,
        silent: bool,
        cwd: Option<&Path>,
    ) -> Result<String, GitError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation {
                command: command.to_string(),
                silent,
                cwd: cwd.map(Path::to_path_buf),
            });
        }

        match self.responses.get(command) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(reason)) => Err(GitError::Process {
                command: command.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}

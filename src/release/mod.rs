//! Release workflow: bump manifests, stage, commit, tag and push.
//!
//! Steps run strictly in order and stop at the first failure. Nothing is undone
//! when a later step fails.

use crate::cli::OutputManager;
use crate::config::ReleaseConfig;
use crate::error::{Result, WorkflowError};
use crate::git::{CommandRunner, GitRelease, create_commit_label, create_tag_label};
use crate::version::{self, ManifestUpdate, VersionBump};
use semver::Version;
use std::path::{Path, PathBuf};

/// What a release run did (or would do, for a dry run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Version read from the first manifest, if any
    pub previous_version: Option<Version>,
    /// Released version
    pub version: Version,
    /// Manifests carrying the released version, staged for the commit
    pub files: Vec<PathBuf>,
    /// Commit message, when a commit was made
    pub commit_label: Option<String>,
    /// Tag name, when a tag was made
    pub tag_label: Option<String>,
    /// Whether upstream tracking had to be set for the current branch
    pub upstream_set: bool,
    /// Whether anything was pushed
    pub pushed: bool,
    /// Whether this was a dry run
    pub dry_run: bool,
}

/// Drives one release through the git facade
#[derive(Debug)]
pub struct ReleaseWorkflow<'a, R: CommandRunner> {
    git: &'a GitRelease<R>,
    config: &'a ReleaseConfig,
    cwd: Option<&'a Path>,
    output: &'a OutputManager,
    dry_run: bool,
}

impl<'a, R: CommandRunner> ReleaseWorkflow<'a, R> {
    /// Create a workflow; `cwd` is passed unmodified to every git command
    pub fn new(
        git: &'a GitRelease<R>,
        config: &'a ReleaseConfig,
        cwd: Option<&'a Path>,
        output: &'a OutputManager,
    ) -> Self {
        Self {
            git,
            config,
            cwd,
            output,
            dry_run: false,
        }
    }

    /// Report every step without writing files or running git actions
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the release
    pub async fn run(&self, bump: &VersionBump) -> Result<ReleaseOutcome> {
        self.check_preconditions().await?;

        let previous_version = self.previous_version(bump).await?;
        let version = match &previous_version {
            Some(current) => bump.apply(current),
            None => bump.apply(&Version::new(0, 0, 0)),
        };
        let version_text = version.to_string();

        match &previous_version {
            Some(previous) => self.progress(&format!("Releasing {} → {}", previous, version)),
            None => self.progress(&format!("Releasing {}", version)),
        }

        let files = self.bump_manifests(&version).await?;

        let commit_label = if self.config.commit {
            let label = create_commit_label(&version_text, self.config.commit_message.as_deref());
            if !self.dry_run {
                self.git
                    .create_commit(&version_text, self.config.commit_message.as_deref(), self.cwd)
                    .await?;
            }
            self.done(&format!("Committed: \"{}\"", label));
            Some(label)
        } else {
            None
        };

        let tag_label = if self.config.tag {
            let label = create_tag_label(&version_text, self.config.tag_message.as_deref());
            if !self.dry_run {
                self.git
                    .create_tag(&version_text, self.config.tag_message.as_deref(), self.cwd)
                    .await?;
            }
            self.done(&format!("Tagged: {}", label));
            Some(label)
        } else {
            None
        };

        let (upstream_set, pushed) = if self.config.push {
            self.push().await?
        } else {
            (false, false)
        };

        Ok(ReleaseOutcome {
            previous_version,
            version,
            files,
            commit_label,
            tag_label,
            upstream_set,
            pushed,
            dry_run: self.dry_run,
        })
    }

    async fn check_preconditions(&self) -> Result<()> {
        if !self.git.has_git_installed().await {
            return Err(WorkflowError::GitNotInstalled {
                binary: self.git.binary().to_string(),
            }
            .into());
        }

        if !self.git.has_git_project(self.cwd).await {
            return Err(WorkflowError::NotRepository.into());
        }

        Ok(())
    }

    async fn previous_version(&self, bump: &VersionBump) -> Result<Option<Version>> {
        match self.config.files.first() {
            Some(first) => Ok(Some(version::current_version(&self.resolve(first)).await?)),
            None if bump.is_relative() => Err(WorkflowError::NoManifest {
                bump: bump.to_string(),
            }
            .into()),
            None => Ok(None),
        }
    }

    async fn bump_manifests(&self, version: &Version) -> Result<Vec<PathBuf>> {
        let mut touched = Vec::new();

        for file in &self.config.files {
            let path = self.resolve(file);

            if self.dry_run {
                self.done(&format!("Would update {}", file.display()));
                touched.push(file.clone());
                continue;
            }

            match version::update_manifest(&path, version).await? {
                ManifestUpdate::NoVersion => {
                    self.warn(&format!(
                        "{} has no string \"version\" property, skipping",
                        file.display()
                    ));
                    continue;
                }
                ManifestUpdate::AlreadyCurrent => {
                    self.done(&format!("{} already at {}", file.display(), version));
                }
                ManifestUpdate::Updated => self.done(&format!("Updated {}", file.display())),
            }

            self.git
                .add_file(&file.display().to_string(), self.cwd)
                .await?;
            touched.push(file.clone());
        }

        Ok(touched)
    }

    async fn push(&self) -> Result<(bool, bool)> {
        let tracked = self.git.is_current_branch_upstream(self.cwd).await;

        if !tracked {
            if !self.dry_run {
                self.git.upstream_current_branch(self.cwd).await?;
            }
            self.done("Upstream tracking set for the current branch");
        }

        if !self.dry_run {
            self.git.push(self.config.push_tags, self.cwd).await?;
        }
        self.done(if self.config.push_tags {
            "Pushed commits and tags"
        } else {
            "Pushed commits"
        });

        Ok((!tracked, true))
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        match self.cwd {
            Some(dir) => dir.join(file),
            None => file.to_path_buf(),
        }
    }

    fn progress(&self, message: &str) {
        let _ = self.output.progress(message);
    }

    fn done(&self, message: &str) {
        let message = if self.dry_run {
            format!("[dry run] {}", message)
        } else {
            message.to_string()
        };
        let _ = self.output.success(&message);
    }

    fn warn(&self, message: &str) {
        let _ = self.output.warn(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GitError, ReleaseError};
    use crate::git::scripted::ScriptedRunner;

    fn quiet() -> OutputManager {
        OutputManager::new(true)
    }

    fn project(version: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            format!("{{\n  \"name\": \"demo\",\n  \"version\": \"{}\"\n}}\n", version),
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_release_runs_steps_in_order() {
        let dir = project("1.0.0");
        let git = GitRelease::new(ScriptedRunner::new());
        let config = ReleaseConfig::default();
        let output = quiet();

        let outcome = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Minor)
            .await
            .unwrap();

        assert_eq!(outcome.previous_version, Some(Version::new(1, 0, 0)));
        assert_eq!(outcome.version, Version::new(1, 1, 0));
        assert_eq!(outcome.commit_label.as_deref(), Some("Release version: 1.1.0"));
        assert_eq!(outcome.tag_label.as_deref(), Some("v1.1.0"));
        assert!(!outcome.pushed);
        assert_eq!(
            git.runner().commands(),
            vec![
                "git --help",
                "git status --porcelain",
                "git add package.json",
                "git commit --all --message \"Release version: 1.1.0\"",
                "git tag \"v1.1.0\"",
            ]
        );
        assert!(git.runner().was_called_with("git add package.json", false, Some(dir.path())));

        let manifest = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"version\": \"1.1.0\""));
    }

    #[tokio::test]
    async fn test_release_uses_labels_from_config() {
        let dir = project("2.3.4");
        let git = GitRelease::new(ScriptedRunner::new());
        let config = ReleaseConfig {
            commit_message: Some("chore: release %s".to_string()),
            tag_message: Some("release-%s".to_string()),
            ..ReleaseConfig::default()
        };
        let output = quiet();

        ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Patch)
            .await
            .unwrap();

        let commands = git.runner().commands();
        assert!(
            commands.contains(&"git commit --all --message \"chore: release 2.3.5\"".to_string())
        );
        assert!(commands.contains(&"git tag \"release-2.3.5\"".to_string()));
    }

    #[tokio::test]
    async fn test_release_stops_outside_repository() {
        let dir = project("1.0.0");
        let git = GitRelease::new(ScriptedRunner::new().fail("git status --porcelain", "fatal"));
        let config = ReleaseConfig::default();
        let output = quiet();

        let result = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Patch)
            .await;

        assert!(matches!(
            result,
            Err(ReleaseError::Workflow(WorkflowError::NotRepository))
        ));
        let manifest = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"version\": \"1.0.0\""));
    }

    #[tokio::test]
    async fn test_release_requires_git() {
        let git = GitRelease::new(ScriptedRunner::new().fail("git --help", "not found"));
        let config = ReleaseConfig::default();
        let output = quiet();

        let result = ReleaseWorkflow::new(&git, &config, None, &output)
            .run(&VersionBump::Patch)
            .await;
        assert!(matches!(
            result,
            Err(ReleaseError::Workflow(WorkflowError::GitNotInstalled { .. }))
        ));
    }

    #[tokio::test]
    async fn test_relative_bump_needs_manifest() {
        let git = GitRelease::new(ScriptedRunner::new());
        let config = ReleaseConfig {
            files: Vec::new(),
            ..ReleaseConfig::default()
        };
        let output = quiet();

        let result = ReleaseWorkflow::new(&git, &config, None, &output)
            .run(&VersionBump::Major)
            .await;
        assert!(matches!(
            result,
            Err(ReleaseError::Workflow(WorkflowError::NoManifest { .. }))
        ));
    }

    #[tokio::test]
    async fn test_exact_version_without_manifest() {
        let git = GitRelease::new(ScriptedRunner::new());
        let config = ReleaseConfig {
            files: Vec::new(),
            commit: false,
            ..ReleaseConfig::default()
        };
        let output = quiet();

        let outcome = ReleaseWorkflow::new(&git, &config, None, &output)
            .run(&VersionBump::Exact(Version::new(3, 0, 0)))
            .await
            .unwrap();

        assert_eq!(outcome.previous_version, None);
        assert_eq!(outcome.commit_label, None);
        assert_eq!(
            git.runner().commands(),
            vec!["git --help", "git status --porcelain", "git tag \"v3.0.0\""]
        );
    }

    #[tokio::test]
    async fn test_push_sets_upstream_when_missing() {
        let dir = project("1.0.0");
        let runner = ScriptedRunner::new()
            .succeed("git rev-parse --abbrev-ref HEAD", "main")
            .succeed("git remote", "origin")
            .succeed("git branch -rvv", "  origin/develop 1234567 wip\n");
        let git = GitRelease::new(runner);
        let config = ReleaseConfig {
            push: true,
            ..ReleaseConfig::default()
        };
        let output = quiet();

        let outcome = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Patch)
            .await
            .unwrap();

        assert!(outcome.upstream_set);
        assert!(outcome.pushed);
        let commands = git.runner().commands();
        let upstream = commands
            .iter()
            .position(|c| c == "git push --set-upstream origin main")
            .unwrap();
        let push = commands
            .iter()
            .position(|c| c == "git push && git push --tags")
            .unwrap();
        assert!(upstream < push);
    }

    #[tokio::test]
    async fn test_push_skips_upstream_when_tracked() {
        let dir = project("1.0.0");
        let runner = ScriptedRunner::new()
            .succeed("git rev-parse --abbrev-ref HEAD", "main")
            .succeed("git remote", "origin")
            .succeed("git branch -rvv", "  origin/main 1234567 [origin/main] init\n");
        let git = GitRelease::new(runner);
        let config = ReleaseConfig {
            push: true,
            push_tags: false,
            ..ReleaseConfig::default()
        };
        let output = quiet();

        let outcome = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Patch)
            .await
            .unwrap();

        assert!(!outcome.upstream_set);
        let commands = git.runner().commands();
        assert!(!commands.iter().any(|c| c.contains("--set-upstream")));
        assert_eq!(commands.last().map(String::as_str), Some("git push"));
    }

    #[tokio::test]
    async fn test_push_fails_without_remote() {
        let dir = project("1.0.0");
        let runner = ScriptedRunner::new()
            .succeed("git rev-parse --abbrev-ref HEAD", "main")
            .succeed("git remote", "");
        let git = GitRelease::new(runner);
        let config = ReleaseConfig {
            push: true,
            ..ReleaseConfig::default()
        };
        let output = quiet();

        let result = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Patch)
            .await;
        assert!(matches!(result, Err(ReleaseError::Git(GitError::NoRemote))));
    }

    #[tokio::test]
    async fn test_commit_failure_is_not_rolled_back() {
        let dir = project("1.0.0");
        let git = GitRelease::new(ScriptedRunner::new().fail(
            "git commit --all --message \"Release version: 1.0.1\"",
            "nothing to commit",
        ));
        let config = ReleaseConfig::default();
        let output = quiet();

        let result = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Patch)
            .await;

        assert!(matches!(result, Err(ReleaseError::Git(GitError::Process { .. }))));
        let manifest = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"version\": \"1.0.1\""));
        assert!(!git.runner().commands().iter().any(|c| c.starts_with("git tag")));
    }

    #[tokio::test]
    async fn test_dry_run_changes_nothing() {
        let dir = project("1.0.0");
        let runner = ScriptedRunner::new()
            .succeed("git rev-parse --abbrev-ref HEAD", "main")
            .succeed("git remote", "origin");
        let git = GitRelease::new(runner);
        let config = ReleaseConfig {
            push: true,
            ..ReleaseConfig::default()
        };
        let output = quiet();

        let outcome = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .dry_run(true)
            .run(&VersionBump::Major)
            .await
            .unwrap();

        assert!(outcome.dry_run);
        assert_eq!(outcome.version, Version::new(2, 0, 0));
        assert_eq!(outcome.tag_label.as_deref(), Some("v2.0.0"));
        let manifest = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"version\": \"1.0.0\""));

        let commands = git.runner().commands();
        assert!(!commands.iter().any(|c| {
            c.starts_with("git add") || c.starts_with("git commit") || c.starts_with("git tag")
                || c.starts_with("git push")
        }));
    }

    #[tokio::test]
    async fn test_exact_version_equal_to_current_is_staged() {
        let dir = project("1.0.0");
        let git = GitRelease::new(ScriptedRunner::new());
        let config = ReleaseConfig::default();
        let output = quiet();

        let outcome = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Exact(Version::new(1, 0, 0)))
            .await
            .unwrap();

        assert_eq!(outcome.files, vec![PathBuf::from("package.json")]);
        assert!(git.runner().was_called_with("git add package.json", false, Some(dir.path())));
    }

    #[tokio::test]
    async fn test_manifest_with_numeric_version_is_left_alone() {
        let dir = project("1.0.0");
        let bower = "{\"version\": 3, \"name\": \"demo\"}";
        std::fs::write(dir.path().join("bower.json"), bower).unwrap();
        let git = GitRelease::new(ScriptedRunner::new());
        let config = ReleaseConfig {
            files: vec![PathBuf::from("package.json"), PathBuf::from("bower.json")],
            ..ReleaseConfig::default()
        };
        let output = quiet();

        let outcome = ReleaseWorkflow::new(&git, &config, Some(dir.path()), &output)
            .run(&VersionBump::Major)
            .await
            .unwrap();

        assert_eq!(outcome.files, vec![PathBuf::from("package.json")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("bower.json")).unwrap(),
            bower
        );
        assert!(!git.runner().commands().contains(&"git add bower.json".to_string()));
    }
}

//! Git CLI subprocess client

use crate::git::{ChangedFilesSource, GitClientConfig, GitError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Lists changed files by shelling out to git
#[derive(Debug, Clone)]
pub struct GitClient {
    config: GitClientConfig,
}

impl GitClient {
    pub fn new(config: GitClientConfig) -> Self {
        Self { config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &GitClientConfig {
        &self.config
    }

    /// Run git with `args` and return its stdout
    ///
    /// # Errors
    /// Returns `GitError` if:
    /// - git cannot be spawned
    /// - git exits with a non-zero status
    /// - the output is not valid UTF-8
    /// - the command times out
    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let subcommand = args.first().copied().unwrap_or_default().to_string();
        debug!("Running git {}", args.join(" "));

        let mut command = Command::new(&self.config.git_path);
        command.args(args).kill_on_drop(true);
        if let Some(dir) = &self.config.repo_dir {
            command.current_dir(dir);
        }

        let result = timeout(Duration::from_secs(self.config.timeout_secs), command.output())
            .await
            .map_err(|_| GitError::Timeout(subcommand.clone(), self.config.timeout_secs))?;

        let output = result
            .map_err(|e| GitError::Internal(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            warn!("git {} exited with code {}: {}", subcommand, code, stderr);
            return Err(GitError::Command {
                command: subcommand,
                code,
                stderr,
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|e| GitError::Internal(format!("Failed to decode git output: {}", e)))
    }
}

#[async_trait]
impl ChangedFilesSource for GitClient {
    /// Files that differ between the merge base of `base_branch` and HEAD.
    ///
    /// Refuses to run with a dirty working tree since the diff would not
    /// describe what is being built.
    async fn changed_files(&self, base_branch: &str) -> Result<Vec<String>, GitError> {
        let status = self.run(&["status", "--porcelain"]).await?;
        if !status.is_empty() {
            return Err(GitError::StagedChanges);
        }

        let merge_base = self.run(&["merge-base", base_branch, "HEAD"]).await?;
        let merge_base = merge_base.trim();
        debug!("Merge base of {} and HEAD is {}", base_branch, merge_base);

        let diff = self
            .run(&[
                "diff",
                "--name-status",
                "-z",
                "--diff-filter=ACMRD",
                "--find-renames",
                merge_base,
                "HEAD",
            ])
            .await?;

        let files = parse_name_status(&diff);
        info!("Found {} changed file(s) since {}", files.len(), base_branch);
        Ok(files)
    }
}

/// Extract paths from `git diff --name-status -z` output.
///
/// Records are NUL separated as `STATUS\0path\0`, with renames and copies
/// carrying `STATUS\0from\0to\0`; the destination path is reported. Paths
/// come through verbatim, spaces and non-ASCII bytes included.
pub fn parse_name_status(output: &str) -> Vec<String> {
    let mut fields = output.split('\0').filter(|field| !field.is_empty());
    let mut files = Vec::new();

    while let Some(status) = fields.next() {
        if status.starts_with('R') || status.starts_with('C') {
            fields.next();
        }
        match fields.next() {
            Some(path) => files.push(path.to_string()),
            None => break,
        }
    }

    files
}

//! Git client configuration

use std::path::PathBuf;

/// Configuration for the git client
#[derive(Debug, Clone)]
pub struct GitClientConfig {
    /// Path to the git executable. Defaults to `git` on PATH.
    pub git_path: String,

    /// Repository to run in. Defaults to the current directory.
    pub repo_dir: Option<PathBuf>,

    /// Timeout for each git invocation in seconds
    pub timeout_secs: u64,
}

impl Default for GitClientConfig {
    fn default() -> Self {
        Self {
            git_path: "git".to_string(),
            repo_dir: None,
            timeout_secs: 60,
        }
    }
}

impl GitClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_git_path(mut self, git_path: impl Into<String>) -> Self {
        self.git_path = git_path.into();
        self
    }

    pub fn with_repo_dir(mut self, repo_dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(repo_dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

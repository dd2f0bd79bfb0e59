//! Changed-file sources

pub mod client;
pub mod config;
pub mod error;

use async_trait::async_trait;
pub use client::{parse_name_status, GitClient};
pub use config::GitClientConfig;
pub use error::GitError;

/// Trait for listing changed files - allows for different implementations
#[async_trait]
pub trait ChangedFilesSource: Send + Sync {
    /// Paths changed between `base_branch` and the current position
    async fn changed_files(&self, base_branch: &str) -> Result<Vec<String>, GitError>;
}

/// A fixed list of changed files
#[derive(Debug, Clone, Default)]
pub struct StaticChangedFiles {
    files: Vec<String>,
}

impl StaticChangedFiles {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ChangedFilesSource for StaticChangedFiles {
    async fn changed_files(&self, _base_branch: &str) -> Result<Vec<String>, GitError> {
        Ok(self.files.clone())
    }
}

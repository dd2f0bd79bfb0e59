//! Git error types

use thiserror::Error;

/// Errors raised while listing changed files
#[derive(Debug, Error)]
pub enum GitError {
    #[error("there are staged changes, please commit or stash them")]
    StagedChanges,

    #[error("git {command} exited with code {code}: {stderr}")]
    Command {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("git {0} timed out after {1} seconds")]
    Timeout(String, u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

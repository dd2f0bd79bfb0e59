//! Pipeline upload through `buildkite-agent`

use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Error types for pipeline upload
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to start {0}: {1}")]
    Spawn(String, std::io::Error),

    #[error("Failed to write pipeline to buildkite-agent: {0}")]
    Write(std::io::Error),

    #[error("buildkite-agent exited with code {0}")]
    Failed(i32),

    #[error("Upload timed out after {0} seconds")]
    Timeout(u64),
}

/// Configuration for the uploader
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Path to the buildkite-agent executable
    pub agent_path: String,

    /// Timeout for the upload in seconds
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            agent_path: "buildkite-agent".to_string(),
            timeout_secs: 60,
        }
    }
}

impl UploadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent_path(mut self, agent_path: impl Into<String>) -> Self {
        self.agent_path = agent_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Uploads a rendered pipeline with `buildkite-agent pipeline upload`
#[derive(Debug, Clone)]
pub struct BuildkiteUploader {
    config: UploadConfig,
}

impl BuildkiteUploader {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Pipe `pipeline` into the agent's stdin.
    ///
    /// The agent's own stdout and stderr are passed through.
    pub async fn upload(&self, pipeline: &str) -> Result<(), UploadError> {
        debug!("Uploading {} bytes of pipeline YAML", pipeline.len());

        let mut child = Command::new(&self.config.agent_path)
            .args(["pipeline", "upload"])
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| UploadError::Spawn(self.config.agent_path.clone(), e))?;

        let upload = async {
            if let Some(mut stdin) = child.stdin.take() {
                match stdin.write_all(pipeline.as_bytes()).await {
                    Ok(()) => {}
                    // The agent quit before reading everything; its exit code says why
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        debug!("buildkite-agent closed stdin early");
                    }
                    Err(e) => return Err(UploadError::Write(e)),
                }
                // Dropping stdin closes the pipe so the agent sees EOF
            }
            child.wait().await.map_err(UploadError::Write)
        };

        let status = timeout(Duration::from_secs(self.config.timeout_secs), upload)
            .await
            .map_err(|_| UploadError::Timeout(self.config.timeout_secs))??;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            warn!("buildkite-agent exited with code {}", code);
            return Err(UploadError::Failed(code));
        }

        Ok(())
    }
}

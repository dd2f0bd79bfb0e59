//! Command-line interface

pub mod output;

use crate::git::GitClientConfig;
use crate::upload::UploadConfig;
use clap::Parser;
use std::ffi::OsString;

/// Base branch used when none is given or the environment leaves it empty
pub const DEFAULT_BASE_BRANCH: &str = "origin/main";

/// Skip Buildkite steps whose watched files did not change
#[derive(Debug, Parser, Clone)]
#[command(name = "skip-unchanged")]
#[command(version)]
#[command(about = "Skips Buildkite pipeline steps whose watched files did not change", long_about = None)]
pub struct Cli {
    /// Path to the pipeline.yml file
    #[arg(default_value = "pipeline.yml")]
    pub pipeline_file: String,

    /// The base branch to compare against
    #[arg(
        long,
        env = "BUILDKITE_PULL_REQUEST_BASE_BRANCH",
        default_value = DEFAULT_BASE_BRANCH
    )]
    pub base_branch: String,

    /// Upload the modified pipeline to Buildkite instead of printing it
    #[arg(long)]
    pub upload: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the git executable
    #[arg(long, default_value = "git")]
    pub git_path: String,

    /// Path to the buildkite-agent executable
    #[arg(long, default_value = "buildkite-agent")]
    pub agent_path: String,

    /// Timeout in seconds for each git or buildkite-agent invocation
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// Base branch to diff against. Buildkite exports an empty value outside
    /// pull request builds, which falls back to the default.
    pub fn base_branch(&self) -> &str {
        match self.base_branch.trim() {
            "" => DEFAULT_BASE_BRANCH,
            branch => branch,
        }
    }

    pub fn git_config(&self) -> GitClientConfig {
        GitClientConfig::new()
            .with_git_path(&self.git_path)
            .with_timeout(self.timeout)
    }

    pub fn upload_config(&self) -> UploadConfig {
        UploadConfig::new()
            .with_agent_path(&self.agent_path)
            .with_timeout(self.timeout)
    }
}

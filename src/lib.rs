//! skip-unchanged - skips Buildkite pipeline steps whose watched files did not change

pub mod app;
pub mod cli;
pub mod core;
pub mod git;
pub mod upload;

// Re-export commonly used types
pub use crate::core::{process_pipeline, Decision, Pipeline, PipelineError, ProcessReport, StepOutcome};
pub use crate::git::{ChangedFilesSource, GitClient, GitClientConfig, GitError, StaticChangedFiles};
pub use crate::upload::{BuildkiteUploader, UploadConfig, UploadError};

//! End-to-end flow: read, diff, rewrite, emit

use crate::cli::output::{style, CHECK, ROCKET};
use crate::cli::Cli;
use crate::core::{Pipeline, ProcessReport};
use crate::git::ChangedFilesSource;
use crate::upload::BuildkiteUploader;
use anyhow::{Context, Result};
use tracing::info;

/// A rewritten pipeline ready to be emitted
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// Rendered YAML
    pub yaml: String,

    /// Per-step outcomes
    pub report: ProcessReport,
}

/// Read the pipeline named on the command line and rewrite it against the
/// files `source` reports as changed
pub async fn run(cli: &Cli, source: &dyn ChangedFilesSource) -> Result<Rewrite> {
    let content = std::fs::read_to_string(&cli.pipeline_file)
        .with_context(|| format!("Failed to read pipeline file {}", cli.pipeline_file))?;
    info!(file = %cli.pipeline_file, "Pipeline file read successfully");

    let base_branch = cli.base_branch();
    let changed_files = source
        .changed_files(base_branch)
        .await
        .with_context(|| format!("Failed to list files changed since {}", base_branch))?;

    let mut pipeline = Pipeline::from_yaml(&content)
        .with_context(|| format!("Failed to load pipeline {}", cli.pipeline_file))?;
    let report = pipeline.process(&changed_files)?;
    let yaml = pipeline.to_yaml()?;

    Ok(Rewrite { yaml, report })
}

/// Upload the pipeline when `--upload` is set, otherwise print it to stdout
pub async fn emit(cli: &Cli, yaml: &str) -> Result<()> {
    if cli.upload {
        eprintln!("{} Uploading pipeline to Buildkite", ROCKET);
        BuildkiteUploader::new(cli.upload_config())
            .upload(yaml)
            .await
            .context("Failed to upload pipeline to Buildkite")?;
        eprintln!("{} Pipeline {}", CHECK, style("uploaded").green());
    } else {
        println!("{}", yaml);
        info!("Modified pipeline written to stdout");
    }

    Ok(())
}

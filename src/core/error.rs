//! Pipeline document errors

use thiserror::Error;

/// Errors that abort processing of a pipeline document
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("pipeline must be a mapping at the top level")]
    NotAMapping,

    #[error("pipeline is missing a top-level `steps` key")]
    MissingSteps,

    #[error("pipeline `steps` must be a list")]
    StepsNotSequence,

    #[error("Failed to render pipeline: {0}")]
    Render(serde_yaml::Error),
}

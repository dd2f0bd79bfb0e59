//! Pipeline rewriting core
//!
//! Walks the `steps` tree of a pipeline document, decides which steps can be
//! skipped given the changed files, and edits the document in place. Nothing
//! in here performs I/O.

pub mod error;
pub mod glob;
pub mod mutate;
pub mod pipeline;
pub mod report;
pub mod step;

pub use error::PipelineError;
pub use pipeline::*;
pub use report::*;
pub use step::{should_skip, Decision};

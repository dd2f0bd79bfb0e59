//! Pipeline document and the step tree walker

use crate::core::{
    error::PipelineError,
    mutate::{mark_skip, remove_skip_if_unchanged},
    report::{ProcessReport, StepOutcome},
    step::{classify, evaluate, Step, StepNode, Unrecognized, STEPS_KEY},
};
use serde_yaml::{Sequence, Value};
use tracing::{debug, info, warn};

/// A parsed pipeline document
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    document: Value,
}

impl Pipeline {
    /// Parse a pipeline from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, PipelineError> {
        let document: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(document)
    }

    /// Wrap an already parsed document, checking it has a `steps` list.
    ///
    /// `<<` merge keys are resolved first so directives inherited from
    /// anchors are seen and stripped like any other.
    pub fn from_value(mut document: Value) -> Result<Self, PipelineError> {
        document.apply_merge()?;
        steps_of(&mut document)?;
        Ok(Self { document })
    }

    /// The underlying document
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Consume the pipeline, returning the document
    pub fn into_document(self) -> Value {
        self.document
    }

    /// Skip every step whose `skip_if_unchanged` patterns match none of
    /// `changed_files`, and strip the directive from every step.
    ///
    /// Groups are descended into and never marked themselves.
    pub fn process<S: AsRef<str>>(
        &mut self,
        changed_files: &[S],
    ) -> Result<ProcessReport, PipelineError> {
        let steps = steps_of(&mut self.document)?;

        let mut walker = Walker::new(changed_files);
        walker.process_steps(steps);
        let report = walker.finish();

        info!(
            "Processed {} step(s): {} skipped, {} kept",
            report.outcomes.len(),
            report.skipped(),
            report.kept()
        );

        Ok(report)
    }

    /// Render the document back to YAML
    pub fn to_yaml(&self) -> Result<String, PipelineError> {
        serde_yaml::to_string(&self.document).map_err(PipelineError::Render)
    }
}

/// Parse `yaml`, rewrite it against `changed_files` and return the result
pub fn process_pipeline<S: AsRef<str>>(
    yaml: &str,
    changed_files: &[S],
) -> Result<(Pipeline, ProcessReport), PipelineError> {
    let mut pipeline = Pipeline::from_yaml(yaml)?;
    let report = pipeline.process(changed_files)?;
    Ok((pipeline, report))
}

fn steps_of(document: &mut Value) -> Result<&mut Sequence, PipelineError> {
    let Value::Mapping(root) = document else {
        return Err(PipelineError::NotAMapping);
    };

    match root.get_mut(STEPS_KEY) {
        Some(Value::Sequence(steps)) => Ok(steps),
        Some(_) => Err(PipelineError::StepsNotSequence),
        None => Err(PipelineError::MissingSteps),
    }
}

/// Recursive traversal state for one `process` call
struct Walker<'c, S> {
    changed_files: &'c [S],
    groups: Vec<String>,
    report: ProcessReport,
}

impl<'c, S: AsRef<str>> Walker<'c, S> {
    fn new(changed_files: &'c [S]) -> Self {
        Self {
            changed_files,
            groups: Vec::new(),
            report: ProcessReport::default(),
        }
    }

    fn finish(self) -> ProcessReport {
        self.report
    }

    fn process_steps(&mut self, steps: &mut Sequence) {
        for (index, node) in steps.iter_mut().enumerate() {
            match classify(node) {
                StepNode::Group { name, steps } => {
                    self.report.groups += 1;
                    match steps {
                        Some(nested) => {
                            debug!(group = %name, "Descending into group");
                            self.groups.push(name);
                            self.process_steps(nested);
                            self.groups.pop();
                        }
                        None => {
                            warn!(group = %name, "Group has no steps list, leaving it untouched");
                        }
                    }
                }
                StepNode::Step(step) => self.process_step(step, index),
                StepNode::Unrecognized(Unrecognized::NotAMapping) => {
                    debug!(index, "Passing through non-mapping step");
                    self.report.unrecognized += 1;
                }
                StepNode::Unrecognized(Unrecognized::MalformedDirective(reason)) => {
                    warn!(index, %reason, "Could not read skip_if_unchanged, leaving step untouched");
                    self.report.unrecognized += 1;
                }
            }
        }
    }

    fn process_step(&mut self, step: Step<'_>, index: usize) {
        let label = step
            .label()
            .unwrap_or_else(|| format!("step #{}", index + 1));

        let Some(patterns) = step.patterns else {
            debug!(step = %label, "No skip_if_unchanged, passing through");
            self.report.passthrough += 1;
            return;
        };

        if patterns.is_empty() {
            // Stripped rather than passed through: the directive never reaches Buildkite
            debug!(step = %label, "Empty skip_if_unchanged, step always runs");
            remove_skip_if_unchanged(step.fields);
            self.report.passthrough += 1;
            return;
        }

        let decision = evaluate(&patterns, self.changed_files);
        if decision.is_skip() {
            mark_skip(step.fields);
        }
        remove_skip_if_unchanged(step.fields);

        let outcome = StepOutcome {
            label,
            groups: self.groups.clone(),
            patterns,
            decision,
        };
        debug!(step = %outcome.display_name(), decision = ?outcome.decision, "Evaluated step");
        self.report.outcomes.push(outcome);
    }
}

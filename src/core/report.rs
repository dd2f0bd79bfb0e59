//! Per-step outcomes collected while rewriting a pipeline

use crate::core::step::Decision;

/// What happened to one step that carried a `skip_if_unchanged` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step label, or its position when it has none
    pub label: String,

    /// Names of the enclosing groups, outermost first
    pub groups: Vec<String>,

    /// Patterns the step declared
    pub patterns: Vec<String>,

    /// Skip decision
    pub decision: Decision,
}

impl StepOutcome {
    /// Label qualified by its enclosing groups, e.g. `Tests / unit`
    pub fn display_name(&self) -> String {
        if self.groups.is_empty() {
            self.label.clone()
        } else {
            format!("{} / {}", self.groups.join(" / "), self.label)
        }
    }
}

/// Summary of a pipeline rewrite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Outcomes for evaluated steps, in document order
    pub outcomes: Vec<StepOutcome>,

    /// Groups descended into
    pub groups: usize,

    /// Steps passed through without evaluation
    pub passthrough: usize,

    /// Nodes left untouched because they could not be interpreted
    pub unrecognized: usize,
}

impl ProcessReport {
    /// Number of steps marked `skip: true`
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.decision.is_skip()).count()
    }

    /// Number of evaluated steps that still run
    pub fn kept(&self) -> usize {
        self.outcomes.len() - self.skipped()
    }

    /// Find the outcome for a step by its label
    pub fn outcome(&self, label: &str) -> Option<&StepOutcome> {
        self.outcomes.iter().find(|o| o.label == label)
    }
}

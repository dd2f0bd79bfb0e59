//! Step node classification and skip evaluation

use crate::core::glob::GlobPattern;
use crate::core::mutate::SKIP_IF_UNCHANGED_KEY;
use serde::Deserialize;
use serde_yaml::{Mapping, Number, Sequence, Value};

/// Key naming a group of nested steps
pub const GROUP_KEY: &str = "group";

/// Key holding a step list (top-level or inside a group)
pub const STEPS_KEY: &str = "steps";

/// Keys tried, in order, when naming a step in logs and reports
const LABEL_KEYS: &[&str] = &["label", "key", "name", "command", "trigger"];

/// A node of a `steps` sequence, classified by shape
#[derive(Debug)]
pub enum StepNode<'a> {
    /// A mapping with a non-empty `group`; only its nested steps are visited
    Group {
        name: String,
        steps: Option<&'a mut Sequence>,
    },
    /// A mapping that is not a group
    Step(Step<'a>),
    /// Anything the walker must leave alone
    Unrecognized(Unrecognized),
}

/// Why a node was not interpreted as a step or group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unrecognized {
    /// Scalars such as a bare `wait`, or nested sequences
    NotAMapping,
    /// `skip_if_unchanged` is present but is not a list of scalars
    MalformedDirective(String),
}

/// A step mapping together with its decoded `skip_if_unchanged` directive
#[derive(Debug)]
pub struct Step<'a> {
    /// The step's ordered fields, mutated in place
    pub fields: &'a mut Mapping,

    /// Patterns from `skip_if_unchanged`, `None` when the key is absent
    pub patterns: Option<Vec<String>>,
}

impl<'a> Step<'a> {
    /// Human-readable name for this step, if it carries one
    pub fn label(&self) -> Option<String> {
        step_label(&*self.fields)
    }
}

/// Outcome of evaluating one step against the changed files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No changed file matched any pattern
    Skipped,
    /// First (pattern, file) pair that matched
    Kept { pattern: String, file: String },
}

impl Decision {
    pub fn is_skip(&self) -> bool {
        matches!(self, Decision::Skipped)
    }
}

/// Classify a child of a `steps` sequence.
///
/// A mapping with a non-empty scalar `group` is a group, whatever else it
/// holds. Other mappings are steps unless their directive cannot be decoded.
pub fn classify(node: &mut Value) -> StepNode<'_> {
    let Value::Mapping(fields) = node else {
        return StepNode::Unrecognized(Unrecognized::NotAMapping);
    };

    if let Some(name) = group_name(fields) {
        let steps = match fields.get_mut(STEPS_KEY) {
            Some(Value::Sequence(steps)) => Some(steps),
            _ => None,
        };
        return StepNode::Group { name, steps };
    }

    match decode_directive(fields.get(SKIP_IF_UNCHANGED_KEY)) {
        Ok(patterns) => StepNode::Step(Step { fields, patterns }),
        Err(reason) => StepNode::Unrecognized(Unrecognized::MalformedDirective(reason)),
    }
}

/// One `skip_if_unchanged` entry. Unquoted numbers and booleans are read as
/// their text, so `[2024]` watches a path named `2024`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatternEntry {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl From<PatternEntry> for String {
    fn from(entry: PatternEntry) -> Self {
        match entry {
            PatternEntry::Text(text) => text,
            PatternEntry::Number(number) => number.to_string(),
            PatternEntry::Bool(flag) => flag.to_string(),
        }
    }
}

/// Text of a scalar node; strings, numbers and booleans all qualify
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn group_name(fields: &Mapping) -> Option<String> {
    fields
        .get(GROUP_KEY)
        .and_then(scalar_text)
        .filter(|name| !name.is_empty())
}

fn decode_directive(value: Option<&Value>) -> Result<Option<Vec<String>>, String> {
    match value {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(Vec::new())),
        Some(Value::Sequence(patterns)) => {
            serde_yaml::from_value::<Vec<PatternEntry>>(Value::Sequence(patterns.clone()))
                .map(|entries| Some(entries.into_iter().map(String::from).collect()))
                .map_err(|e| e.to_string())
        }
        Some(_) => Err(format!("`{}` must be a list of glob patterns", SKIP_IF_UNCHANGED_KEY)),
    }
}

/// Name a step by the first scalar label-like key
pub fn step_label(fields: &Mapping) -> Option<String> {
    LABEL_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(scalar_text))
}

/// Decide whether a step watching `patterns` can be skipped.
///
/// The step is kept as soon as one changed file matches one pattern. Invalid
/// patterns are logged and never match.
pub fn evaluate<S: AsRef<str>>(patterns: &[String], changed_files: &[S]) -> Decision {
    let globs: Vec<GlobPattern> = patterns
        .iter()
        .filter_map(|pattern| GlobPattern::compile_lenient(pattern))
        .collect();

    for file in changed_files {
        let file = file.as_ref();
        if let Some(glob) = globs.iter().find(|glob| glob.is_match(file)) {
            return Decision::Kept {
                pattern: glob.as_str().to_string(),
                file: file.to_string(),
            };
        }
    }

    Decision::Skipped
}

/// `true` when no changed file matches any of `patterns`
pub fn should_skip<S: AsRef<str>>(patterns: &[String], changed_files: &[S]) -> bool {
    evaluate(patterns, changed_files).is_skip()
}

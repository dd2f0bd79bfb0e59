//! In-place edits of step mappings

use serde_yaml::{Mapping, Value};

/// Directive consumed by this tool, never emitted
pub const SKIP_IF_UNCHANGED_KEY: &str = "skip_if_unchanged";

/// Marker understood by Buildkite
pub const SKIP_KEY: &str = "skip";

/// Mark a step as skipped by appending `skip: true`.
///
/// An existing `skip: false` is flipped in place; any other existing `skip`
/// value already skips the step and is kept. Returns whether the mapping
/// changed.
pub fn mark_skip(step: &mut Mapping) -> bool {
    if let Some(existing) = step.get_mut(SKIP_KEY) {
        if existing.as_bool() == Some(false) {
            *existing = Value::Bool(true);
            return true;
        }
        return false;
    }

    step.insert(Value::String(SKIP_KEY.to_string()), Value::Bool(true));
    true
}

/// Remove `key` and its value, keeping the order of the remaining pairs
pub fn remove_field(step: &mut Mapping, key: &str) -> Option<Value> {
    step.shift_remove(key)
}

/// Strip the `skip_if_unchanged` directive. Returns whether it was present.
pub fn remove_skip_if_unchanged(step: &mut Mapping) -> bool {
    remove_field(step, SKIP_IF_UNCHANGED_KEY).is_some()
}

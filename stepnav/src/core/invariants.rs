//! Semantic invariants of a task definition not expressible via JSON Schema.
//!
//! Navigators never run these checks; building a navigator over an invalid
//! task still succeeds. The task loader runs them before handing a task out.

use std::collections::HashSet;

use crate::step::Step;
use crate::task::Task;

/// Check semantic invariants not expressible in JSON Schema:
/// - Non-empty identifiers
/// - No duplicate identifiers anywhere in the tree
/// - Sections hold at least one step; other steps hold none
/// - Every progress marker names a step
pub fn validate_invariants(task: &Task) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for step in &task.steps {
        validate_step(step, &mut seen, &mut errors, &step.identifier);
    }

    if let Some(markers) = &task.progress_markers {
        for marker in markers {
            if !seen.contains(marker.as_str()) {
                errors.push(format!("progress marker '{}' names no step", marker));
            }
        }
    }
    errors
}

fn validate_step<'a>(
    step: &'a Step,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<String>,
    path: &str,
) {
    if step.identifier.trim().is_empty() {
        errors.push(format!("{}: identifier must be non-empty", path));
    }

    if !seen.insert(step.identifier.as_str()) {
        errors.push(format!("duplicate identifier '{}' at {}", step.identifier, path));
    }

    if !step.is_section() {
        if !step.steps.is_empty() {
            errors.push(format!("{}: only sections may contain steps", path));
        }
        return;
    }

    if step.steps.is_empty() {
        errors.push(format!("{}: section must contain at least one step", path));
    }

    for child in &step.steps {
        let child_path = format!("{}/{}", path, child.identifier);
        validate_step(child, seen, errors, &child_path);
    }
}

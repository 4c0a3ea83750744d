//! Helpers for rendering deterministic step paths.

use crate::step::Step;

/// Return the `/`-separated identifier path to `target_id` within `steps`.
///
/// Only sections are descended into, matching how navigators index steps.
pub fn step_path(steps: &[Step], target_id: &str) -> Option<String> {
    let mut path = Vec::new();
    for step in steps {
        if step_path_inner(step, target_id, &mut path) {
            return Some(path.join("/"));
        }
    }
    None
}

fn step_path_inner<'a>(step: &'a Step, target_id: &str, path: &mut Vec<&'a str>) -> bool {
    path.push(step.identifier.as_str());
    if step.identifier == target_id {
        return true;
    }
    if step.is_section() {
        for child in &step.steps {
            if step_path_inner(child, target_id, path) {
                return true;
            }
        }
    }
    path.pop();
    false
}

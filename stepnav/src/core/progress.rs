//! Progress through a task, by markers or by estimate.

use std::collections::HashSet;

use serde::Serialize;

use crate::result::TaskResult;

/// How far into a task the user is. `progress` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TaskProgress {
    pub progress: usize,
    pub total: usize,
    pub estimated: bool,
}

impl TaskProgress {
    pub fn new(progress: usize, total: usize, estimated: bool) -> Self {
        Self {
            progress,
            total,
            estimated,
        }
    }
}

/// Progress counted in reached markers.
///
/// The reached set is the top-level history plus `step_id`. Returns `None`
/// when no marker has been reached yet, and when the last marker has been
/// passed but `step_id` itself is not a marker.
pub fn marker_progress(
    markers: &[String],
    step_id: &str,
    result: &TaskResult,
) -> Option<TaskProgress> {
    let mut reached: HashSet<&str> = result.history_identifiers().collect();
    reached.insert(step_id);

    let index = markers
        .iter()
        .rposition(|marker| reached.contains(marker.as_str()))?;
    let current = index + 1;
    if current == markers.len() && !markers.iter().any(|marker| marker == step_id) {
        return None;
    }
    Some(TaskProgress::new(current, markers.len(), false))
}

/// Progress estimated from the known steps and the finished history.
///
/// History entries the tree does not know still count toward the total, so
/// `progress` may exceed `total` when the history comes from a differently
/// shaped task.
pub fn estimated_progress<'a, I>(known_ids: I, step_id: &str, result: &TaskResult) -> TaskProgress
where
    I: IntoIterator<Item = &'a str>,
{
    let known: HashSet<&str> = known_ids.into_iter().collect();
    let mut finished: HashSet<&str> = result.history_identifiers().collect();

    let shared = finished.iter().filter(|id| known.contains(*id)).count();
    let total = known.len() + finished.len() - shared;

    finished.remove(step_id);
    TaskProgress::new(finished.len() + 1, total, true)
}

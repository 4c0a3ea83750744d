//! Navigation queries behind the `stepnav` subcommands.
//!
//! Each query builds a navigator of the requested kind over an in-memory
//! task, resolves identifiers through it (legacy shorthand included) and
//! returns a structured outcome for the CLI to print.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::debug;

use crate::core::path::step_path;
use crate::core::progress::TaskProgress;
use crate::io::result_store::load_or_empty;
use crate::io::task_store::load_task;
use crate::navigator::{NavDirection, NavigatorKind, StepNavigator, create_navigator};
use crate::result::{StepResult, TaskResult};
use crate::step::Step;
use crate::task::Task;

/// Step metadata for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub identifier: String,
    pub step_type: String,
    /// `/`-joined identifiers from the top-level step down.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<NavDirection>,
}

impl StepReport {
    fn new(task: &Task, step: &Step, direction: Option<NavDirection>) -> Self {
        let path = step_path(&task.steps, &step.identifier)
            .unwrap_or_else(|| step.identifier.clone());
        Self {
            identifier: step.identifier.clone(),
            step_type: step.step_type.clone(),
            path,
            direction,
        }
    }
}

/// Outcome of a next/previous query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum NavigationOutcome {
    /// Navigation lands on a step.
    Moved(StepReport),
    /// No step in that direction (end of task, or back navigation blocked).
    End,
}

/// Outcome of a progress query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ProgressOutcome {
    Progress(TaskProgress),
    /// The navigator has no progress to show at this step.
    Hidden,
}

/// Summary of a task definition that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub identifier: String,
    pub steps: usize,
    pub leaves: usize,
    pub progress_markers: Option<usize>,
}

/// Load a task and its result snapshot. A missing `result_path`, or a path
/// that does not exist yet, gives an empty result named after the task.
pub fn load_inputs(task_path: &Path, result_path: Option<&Path>) -> Result<(Task, TaskResult)> {
    let task = load_task(task_path)?;
    let result = match result_path {
        Some(path) => load_or_empty(path, &task.identifier)?,
        None => TaskResult::new(task.identifier.as_str()),
    };
    Ok((task, result))
}

fn resolve<'n>(navigator: &'n dyn StepNavigator, identifier: &str) -> Result<&'n Step> {
    navigator
        .step(identifier)
        .ok_or_else(|| anyhow!("unknown step '{}'", identifier))
}

/// Validate a task definition file and summarize it.
pub fn validate(task_path: &Path) -> Result<TaskSummary> {
    let task = load_task(task_path)?;
    Ok(summarize(&task))
}

/// Count the steps and leaves the tree navigator indexes.
pub fn summarize(task: &Task) -> TaskSummary {
    let navigator = create_navigator(NavigatorKind::Tree, task);
    let steps = navigator.steps();
    TaskSummary {
        identifier: task.identifier.clone(),
        steps: steps.len(),
        leaves: steps.iter().filter(|step| !step.is_section()).count(),
        progress_markers: task.progress_markers.as_ref().map(Vec::len),
    }
}

/// Every step the navigator knows, in its own order.
pub fn list_steps(task: &Task, kind: NavigatorKind) -> Vec<StepReport> {
    let navigator = create_navigator(kind, task);
    navigator
        .steps()
        .into_iter()
        .map(|step| StepReport::new(task, step, None))
        .collect()
}

/// Resolve one identifier to its step.
pub fn find_step(task: &Task, kind: NavigatorKind, identifier: &str) -> Result<StepReport> {
    let navigator = create_navigator(kind, task);
    let step = resolve(navigator.as_ref(), identifier)?;
    Ok(StepReport::new(task, step, None))
}

/// Step after `from`; the first step when `from` is `None`.
pub fn next(
    task: &Task,
    kind: NavigatorKind,
    from: Option<&str>,
    result: &TaskResult,
) -> Result<NavigationOutcome> {
    let navigator = create_navigator(kind, task);
    let current = from
        .map(|identifier| resolve(navigator.as_ref(), identifier))
        .transpose()?;
    let outcome = match navigator.next_step(current, result) {
        Some(transition) => NavigationOutcome::Moved(StepReport::new(
            task,
            transition.step,
            Some(transition.direction),
        )),
        None => NavigationOutcome::End,
    };
    debug!(from = ?from, ?outcome, "next step");
    Ok(outcome)
}

/// Step before `from`.
pub fn previous(
    task: &Task,
    kind: NavigatorKind,
    from: &str,
    result: &TaskResult,
) -> Result<NavigationOutcome> {
    let navigator = create_navigator(kind, task);
    let current = resolve(navigator.as_ref(), from)?;
    let outcome = match navigator.previous_step(current, result) {
        Some(step) => {
            NavigationOutcome::Moved(StepReport::new(task, step, Some(NavDirection::Backward)))
        }
        None => NavigationOutcome::End,
    };
    debug!(from, ?outcome, "previous step");
    Ok(outcome)
}

/// Progress at `identifier`.
pub fn progress(
    task: &Task,
    kind: NavigatorKind,
    identifier: &str,
    result: &TaskResult,
) -> Result<ProgressOutcome> {
    let navigator = create_navigator(kind, task);
    let step = resolve(navigator.as_ref(), identifier)?;
    Ok(match navigator.progress(step, result) {
        Some(progress) => ProgressOutcome::Progress(progress),
        None => ProgressOutcome::Hidden,
    })
}

/// Record that `identifier` was completed, optionally jumping to `skip_to`.
///
/// Returns a new snapshot; an earlier result for the same step is replaced.
pub fn record(
    task: &Task,
    kind: NavigatorKind,
    result: &TaskResult,
    identifier: &str,
    skip_to: Option<&str>,
) -> Result<TaskResult> {
    let navigator = create_navigator(kind, task);
    let step = resolve(navigator.as_ref(), identifier)?;
    let mut step_result = StepResult::new(step.identifier.as_str());
    if let Some(target) = skip_to {
        let target = resolve(navigator.as_ref(), target)
            .with_context(|| format!("skip-to target of '{}'", step.identifier))?;
        step_result = step_result.with_skip_to(target.identifier.as_str());
    }
    Ok(result.add_step_history(step_result))
}

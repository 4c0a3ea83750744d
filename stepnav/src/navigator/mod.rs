//! Navigators resolve the next step, the previous step and progress for a
//! position in a task.
//!
//! Three variants share one surface:
//!
//! - [`OrderedStepNavigator`]: flat list, index arithmetic, ignores results.
//! - [`TreeNavigator`]: nested sections, pre-order leaf traversal, marker or
//!   estimated progress.
//! - [`StrategyBasedNavigator`]: tree traversal plus per-step next, back and
//!   skip strategies.
//!
//! Every query is a pure function of the navigator (immutable once built),
//! the step, and the result snapshot. "No such step" is `None`; unknown steps
//! are additionally reported as `tracing` warnings.

mod ordered;
mod strategy;
mod tree;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::progress::TaskProgress;
use crate::result::TaskResult;
use crate::step::Step;
use crate::task::Task;

pub use ordered::OrderedStepNavigator;
pub use strategy::StrategyBasedNavigator;
pub use tree::TreeNavigator;

/// Direction the UI should animate when moving to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    /// Moving on to a later step (content shifts left).
    Forward,
    /// Returning to an earlier step (content shifts right).
    Backward,
}

/// A step to move to, with the direction of the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a> {
    pub step: &'a Step,
    pub direction: NavDirection,
}

impl<'a> Transition<'a> {
    pub fn forward(step: &'a Step) -> Self {
        Self {
            step,
            direction: NavDirection::Forward,
        }
    }
}

pub trait StepNavigator {
    /// Step registered under `identifier`.
    fn step(&self, identifier: &str) -> Option<&Step>;

    /// Step after `step`, or the first step when `step` is `None`.
    fn next_step(&self, step: Option<&Step>, result: &TaskResult) -> Option<Transition<'_>>;

    /// Step before `step`.
    fn previous_step(&self, step: &Step, result: &TaskResult) -> Option<&Step>;

    /// Progress at `step`, or `None` when there is nothing to show.
    fn progress(&self, step: &Step, result: &TaskResult) -> Option<TaskProgress>;

    /// Every step the navigator knows. Not necessarily in task order.
    fn steps(&self) -> Vec<&Step>;
}

/// Navigator variant to build for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NavigatorKind {
    Ordered,
    Tree,
    #[default]
    Strategy,
}

/// Build the navigator of `kind` over `task`.
///
/// The ordered navigator takes no progress markers; it always reports exact
/// progress through the flat list.
pub fn create_navigator<'a>(kind: NavigatorKind, task: &'a Task) -> Box<dyn StepNavigator + 'a> {
    debug!(
        task = %task.identifier,
        ?kind,
        steps = task.steps.len(),
        "building navigator"
    );
    let markers = task.progress_markers.clone();
    match kind {
        NavigatorKind::Ordered => Box::new(OrderedStepNavigator::new(&task.steps)),
        NavigatorKind::Tree => Box::new(TreeNavigator::new(&task.steps, markers)),
        NavigatorKind::Strategy => Box::new(StrategyBasedNavigator::new(&task.steps, markers)),
    }
}

use tracing::warn;

use super::{StepNavigator, Transition};
use crate::core::progress::{TaskProgress, estimated_progress, marker_progress};
use crate::core::shorthand::resolve_legacy_shorthand;
use crate::core::tree::{Leaves, StepTree};
use crate::result::TaskResult;
use crate::step::Step;

/// Navigator over nested sections using pre-order leaf traversal.
///
/// Only leaves are ever returned by next/previous; sections are entered and
/// left transparently. Progress is counted in `progress_markers` when they
/// are present and estimated from the step count otherwise.
#[derive(Debug, Clone)]
pub struct TreeNavigator<'a> {
    tree: StepTree<'a>,
    progress_markers: Option<Vec<String>>,
}

impl<'a> TreeNavigator<'a> {
    pub fn new(steps: &'a [Step], progress_markers: Option<Vec<String>>) -> Self {
        Self {
            tree: StepTree::new(steps),
            progress_markers,
        }
    }

    pub(crate) fn tree(&self) -> &StepTree<'a> {
        &self.tree
    }

    /// Direct lookup, then the legacy `_`-path shorthand.
    pub fn lookup(&self, identifier: &str) -> Option<&'a Step> {
        let found = self
            .tree
            .get(identifier)
            .or_else(|| resolve_legacy_shorthand(&self.tree, identifier));
        if found.is_none() {
            warn!(identifier, "unable to locate step");
        }
        found
    }

    /// Leaf after `step` in pre-order; the first leaf when `step` is `None`.
    pub fn next_leaf(&self, step: Option<&Step>) -> Option<&'a Step> {
        self.leaves_after(step).next()
    }

    /// Leaf before `step`, walking children in reverse.
    pub fn previous_leaf(&self, step: &Step) -> Option<&'a Step> {
        self.leaves_before(step).next()
    }

    /// Leaves after `step` in pre-order, nearest first.
    pub fn leaves_after(&self, step: Option<&Step>) -> Leaves<'_, 'a> {
        match self.tree.leaves_after(step.map(|step| step.identifier.as_str())) {
            Some(leaves) => leaves,
            None => {
                if let Some(step) = step {
                    warn!(step = %step, "unable to locate step in tree, no next step");
                }
                self.tree.no_leaves()
            }
        }
    }

    /// Leaves before `step`, nearest first.
    pub fn leaves_before(&self, step: &Step) -> Leaves<'_, 'a> {
        self.tree.leaves_before(&step.identifier).unwrap_or_else(|| {
            warn!(step = %step, "unable to locate step in tree, no previous step");
            self.tree.no_leaves()
        })
    }
}

impl StepNavigator for TreeNavigator<'_> {
    fn step(&self, identifier: &str) -> Option<&Step> {
        self.lookup(identifier)
    }

    fn next_step(&self, step: Option<&Step>, _result: &TaskResult) -> Option<Transition<'_>> {
        self.next_leaf(step).map(Transition::forward)
    }

    fn previous_step(&self, step: &Step, _result: &TaskResult) -> Option<&Step> {
        self.previous_leaf(step)
    }

    fn progress(&self, step: &Step, result: &TaskResult) -> Option<TaskProgress> {
        match &self.progress_markers {
            Some(markers) => marker_progress(markers, &step.identifier, result),
            None => Some(estimated_progress(
                self.tree.identifiers(),
                &step.identifier,
                result,
            )),
        }
    }

    fn steps(&self) -> Vec<&Step> {
        self.tree.steps().to_vec()
    }
}

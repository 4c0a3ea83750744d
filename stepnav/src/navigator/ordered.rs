use std::collections::HashMap;

use tracing::warn;

use super::{StepNavigator, Transition};
use crate::core::progress::TaskProgress;
use crate::result::TaskResult;
use crate::step::Step;

/// Navigator over a flat, unconditional list of steps.
///
/// Sections are treated as opaque steps. The task result never changes the
/// answer.
#[derive(Debug, Clone)]
pub struct OrderedStepNavigator<'a> {
    steps: &'a [Step],
    by_id: HashMap<&'a str, &'a Step>,
}

impl<'a> OrderedStepNavigator<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        let mut by_id = HashMap::with_capacity(steps.len());
        for step in steps {
            by_id.entry(step.identifier.as_str()).or_insert(step);
        }
        Self { steps, by_id }
    }

    fn index_of(&self, step: &Step) -> Option<usize> {
        self.steps.iter().position(|candidate| candidate == step)
    }
}

impl StepNavigator for OrderedStepNavigator<'_> {
    fn step(&self, identifier: &str) -> Option<&Step> {
        self.by_id.get(identifier).copied()
    }

    fn next_step(&self, step: Option<&Step>, _result: &TaskResult) -> Option<Transition<'_>> {
        let next_index = match step {
            None => 0,
            Some(step) => match self.index_of(step) {
                Some(index) => index + 1,
                None => {
                    warn!(step = %step, "unable to locate step, no next step");
                    return None;
                }
            },
        };
        self.steps.get(next_index).map(Transition::forward)
    }

    fn previous_step(&self, step: &Step, _result: &TaskResult) -> Option<&Step> {
        match self.index_of(step) {
            Some(0) => None,
            Some(index) => self.steps.get(index - 1),
            None => {
                warn!(step = %step, "unable to locate step, no previous step");
                None
            }
        }
    }

    fn progress(&self, step: &Step, _result: &TaskResult) -> Option<TaskProgress> {
        let Some(index) = self.index_of(step) else {
            warn!(step = %step, "unable to locate step, no progress");
            return None;
        };
        Some(TaskProgress::new(index + 1, self.steps.len(), false))
    }

    fn steps(&self) -> Vec<&Step> {
        self.steps.iter().collect()
    }
}

use tracing::{debug, warn};

use super::{NavDirection, StepNavigator, Transition, TreeNavigator};
use crate::core::progress::TaskProgress;
use crate::result::TaskResult;
use crate::step::Step;

/// Tree navigation with per-step next, back and skip strategies.
///
/// Forward resolution order:
/// 1. a `skip_to_identifier` on the current step's result,
/// 2. the current step's next strategy,
/// 3. the pre-order successor, passing over steps whose skip strategy fires.
///
/// Targets from 1 and 2 are returned as-is (sections resolve to their first
/// leaf); an identifier that names no step falls through to 3.
///
/// Backward, a step whose back strategy refuses has no previous step.
/// Otherwise the entry recorded just before the step's own result wins, so
/// going back after a jump returns to where the jump started. Without one,
/// the pre-order predecessor is used, again passing over skipped steps.
#[derive(Debug, Clone)]
pub struct StrategyBasedNavigator<'a> {
    tree: TreeNavigator<'a>,
}

impl<'a> StrategyBasedNavigator<'a> {
    pub fn new(steps: &'a [Step], progress_markers: Option<Vec<String>>) -> Self {
        Self {
            tree: TreeNavigator::new(steps, progress_markers),
        }
    }

    fn explicit_target(&self, step: &Step, result: &TaskResult) -> Option<&'a Step> {
        let skip_to = result
            .result(&step.identifier)
            .and_then(|step_result| step_result.skip_to_identifier.as_deref());
        if let Some(identifier) = skip_to {
            match self.tree.lookup(identifier) {
                Some(target) => return Some(target.first_leaf()),
                None => warn!(step = %step, skip_to = identifier, "skip-to target not found"),
            }
        }

        if let Some(identifier) = step.next_step_identifier(result) {
            match self.tree.lookup(&identifier) {
                Some(target) => return Some(target.first_leaf()),
                None => warn!(step = %step, next = %identifier, "next step target not found"),
            }
        }
        None
    }

    /// Step recorded just before `step`'s own result in the history.
    fn recorded_previous(&self, step: &Step, result: &TaskResult) -> Option<&'a Step> {
        let index = result
            .step_history
            .iter()
            .position(|entry| entry.identifier == step.identifier)?;
        let earlier = &result.step_history[index.checked_sub(1)?];
        let target = self.tree.lookup(&earlier.identifier)?.first_leaf();
        (!is_skipped(target, result)).then_some(target)
    }

    /// `Backward` when `to` precedes `from` in the flattened task.
    fn direction(&self, from: &Step, to: &Step) -> NavDirection {
        let tree = self.tree.tree();
        match (tree.position(&from.identifier), tree.position(&to.identifier)) {
            (Some(from_index), Some(to_index)) if to_index < from_index => NavDirection::Backward,
            _ => NavDirection::Forward,
        }
    }
}

fn is_skipped(step: &Step, result: &TaskResult) -> bool {
    let skip = step.should_skip(result);
    if skip {
        debug!(step = %step, "skipping step");
    }
    skip
}

impl StepNavigator for StrategyBasedNavigator<'_> {
    fn step(&self, identifier: &str) -> Option<&Step> {
        self.tree.lookup(identifier)
    }

    fn next_step(&self, step: Option<&Step>, result: &TaskResult) -> Option<Transition<'_>> {
        if let Some(current) = step {
            if let Some(target) = self.explicit_target(current, result) {
                return Some(Transition {
                    step: target,
                    direction: self.direction(current, target),
                });
            }
        }

        self.tree
            .leaves_after(step)
            .find(|candidate| !is_skipped(candidate, result))
            .map(Transition::forward)
    }

    fn previous_step(&self, step: &Step, result: &TaskResult) -> Option<&Step> {
        if !step.is_back_allowed(result) {
            debug!(step = %step, "backward navigation blocked");
            return None;
        }
        if let Some(recorded) = self.recorded_previous(step, result) {
            return Some(recorded);
        }

        self.tree
            .leaves_before(step)
            .find(|candidate| !is_skipped(candidate, result))
    }

    fn progress(&self, step: &Step, result: &TaskResult) -> Option<TaskProgress> {
        self.tree.progress(step, result)
    }

    fn steps(&self) -> Vec<&Step> {
        self.tree.steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::StepResult;
    use crate::strategy::{ConstantBackRule, ConstantNextStep, SkipWhenResultPresent};
    use crate::test_support::{section, step, task_result};

    fn id<'a>(transition: Option<Transition<'a>>) -> Option<&'a str> {
        transition.map(|t| t.step.identifier.as_str())
    }

    #[test]
    fn skip_to_result_overrides_next_strategy() {
        let steps = vec![
            step("a").with_next_strategy(ConstantNextStep::new("b")),
            step("b"),
            step("c"),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result =
            TaskResult::new("task").add_step_history(StepResult::new("a").with_skip_to("c"));

        assert_eq!(id(navigator.next_step(Some(&steps[0]), &result)), Some("c"));
    }

    #[test]
    fn earlier_target_is_tagged_backward() {
        let steps = vec![
            step("a"),
            step("b"),
            step("c").with_next_strategy(ConstantNextStep::new("a")),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = TaskResult::new("task");

        let transition = navigator.next_step(Some(&steps[2]), &result).expect("target");
        assert_eq!(transition.step.identifier, "a");
        assert_eq!(transition.direction, NavDirection::Backward);

        let forward = navigator.next_step(Some(&steps[0]), &result).expect("successor");
        assert_eq!(forward.direction, NavDirection::Forward);
    }

    #[test]
    fn section_target_resolves_to_first_leaf() {
        let steps = vec![
            step("a").with_next_strategy(ConstantNextStep::new("s")),
            step("b"),
            section("s", &["s.1", "s.2"]),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);

        assert_eq!(
            id(navigator.next_step(Some(&steps[0]), &TaskResult::new("task"))),
            Some("s.1")
        );
    }

    #[test]
    fn unknown_target_falls_back_to_tree_order() {
        let steps = vec![
            step("a").with_next_strategy(ConstantNextStep::new("nowhere")),
            step("b"),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        assert_eq!(
            id(navigator.next_step(Some(&steps[0]), &TaskResult::new("task"))),
            Some("b")
        );
    }

    #[test]
    fn explicit_target_is_not_skip_checked() {
        let steps = vec![
            step("a").with_next_strategy(ConstantNextStep::new("c")),
            step("b"),
            step("c").with_skip_strategy(SkipWhenResultPresent::new(["skip"])),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = task_result(&["skip"]);
        assert_eq!(id(navigator.next_step(Some(&steps[0]), &result)), Some("c"));
    }

    #[test]
    fn consecutive_skips_are_passed_over_in_both_directions() {
        let skip = || SkipWhenResultPresent::new(["skip"]);
        let steps = vec![
            step("a"),
            step("b").with_skip_strategy(skip()),
            Step::section("s", vec![step("s.1").with_skip_strategy(skip())]),
            step("c"),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = task_result(&["skip"]);

        assert_eq!(id(navigator.next_step(Some(&steps[0]), &result)), Some("c"));
        assert_eq!(
            navigator
                .previous_step(&steps[3], &result)
                .map(|s| s.identifier.as_str()),
            Some("a")
        );
        assert!(navigator.next_step(Some(&steps[3]), &result).is_none());
    }

    #[test]
    fn first_step_may_be_skipped() {
        let steps = vec![
            step("a").with_skip_strategy(|result: &TaskResult| result.result("done_a").is_some()),
            step("b"),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);

        assert_eq!(id(navigator.next_step(None, &task_result(&["done_a"]))), Some("b"));
        assert_eq!(id(navigator.next_step(None, &TaskResult::new("task"))), Some("a"));
    }

    #[test]
    fn blocked_back_returns_none() {
        let steps = vec![
            step("a"),
            step("b").with_back_strategy(ConstantBackRule { allowed: false }),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        assert!(navigator.previous_step(&steps[1], &TaskResult::new("task")).is_none());
    }

    #[test]
    fn previous_follows_recorded_history() {
        let steps = vec![
            step("a"),
            step("b"),
            step("c").with_next_strategy(ConstantNextStep::new("a")),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let previous = |from: &Step, result: &TaskResult| {
            navigator
                .previous_step(from, result)
                .map(|s| s.identifier.clone())
        };

        assert_eq!(previous(&steps[0], &task_result(&["b", "c", "a"])).as_deref(), Some("c"));
        // First in the history, or not in it at all: tree order.
        assert_eq!(previous(&steps[1], &task_result(&["b", "c"])).as_deref(), Some("a"));
        assert_eq!(previous(&steps[2], &task_result(&["a"])).as_deref(), Some("b"));
        // An earlier entry naming no step falls back too.
        assert_eq!(previous(&steps[2], &task_result(&["other", "c"])).as_deref(), Some("b"));
    }

    #[test]
    fn recorded_previous_respects_skip_and_sections() {
        let steps = vec![
            step("a"),
            step("b").with_skip_strategy(SkipWhenResultPresent::new(["skip"])),
            section("s", &["s.1", "s.2"]),
            step("c"),
        ];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let previous = |from: &Step, result: &TaskResult| {
            navigator
                .previous_step(from, result)
                .map(|s| s.identifier.clone())
        };

        assert_eq!(previous(&steps[3], &task_result(&["s", "c"])).as_deref(), Some("s.1"));
        assert_eq!(
            previous(&steps[3], &task_result(&["skip", "b", "c"])).as_deref(),
            Some("s.2")
        );
    }

    #[test]
    fn repeated_identifiers_do_not_loop() {
        let skip = || SkipWhenResultPresent::new(["skip"]);
        let steps = vec![Step::section("dup", vec![step("dup").with_skip_strategy(skip())])];
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = task_result(&["skip"]);

        assert!(navigator.next_step(None, &result).is_none());
        assert!(navigator.next_step(Some(&steps[0].steps[0]), &result).is_none());
        assert!(navigator.previous_step(&steps[0].steps[0], &result).is_none());
    }
}

//! Strategy-based navigation scenarios over the strategy reference task.
//!
//! Every scenario runs twice: once over steps built in code and once over the
//! same task loaded from its JSON definition, so declarative rules and
//! closures must behave alike.

use std::ops::Range;

use stepnav::io::task_store::parse_task;
use stepnav::navigator::{NavDirection, StepNavigator, StrategyBasedNavigator};
use stepnav::result::{StepResult, TaskResult};
use stepnav::step::Step;
use stepnav::strategy::SkipWhenResultPresent;
use stepnav::test_support::{
    SKIP_RESULT_IDENTIFIER, STRATEGY_TASK_JSON, leaves, section, section_result, step,
    strategy_steps,
};

fn step_sets() -> Vec<Vec<Step>> {
    let loaded = parse_task(STRATEGY_TASK_JSON).expect("strategy fixture");
    vec![strategy_steps(), loaded.steps]
}

fn child<'a>(steps: &'a [Step], section: usize, index: usize) -> &'a Step {
    &steps[section].steps[index]
}

/// Plain results for `steps[plain]`, then section results covering
/// `sections` (top-level index, substep range).
fn history(
    steps: &[Step],
    plain: Range<usize>,
    sections: &[(usize, Range<usize>)],
    skip: bool,
) -> TaskResult {
    let mut results = Vec::new();
    if skip {
        results.push(StepResult::new(SKIP_RESULT_IDENTIFIER));
    }
    results.extend(
        steps[plain]
            .iter()
            .map(|step| StepResult::new(step.identifier.as_str())),
    );
    for (index, range) in sections {
        results.push(section_result(&steps[*index], range.clone()));
    }
    TaskResult::with_history("task", results)
}

fn next_id(
    navigator: &StrategyBasedNavigator<'_>,
    from: &Step,
    result: &TaskResult,
) -> Option<String> {
    navigator
        .next_step(Some(from), result)
        .map(|transition| transition.step.identifier.clone())
}

fn previous_id(
    navigator: &StrategyBasedNavigator<'_>,
    from: &Step,
    result: &TaskResult,
) -> Option<String> {
    navigator
        .previous_step(from, result)
        .map(|step| step.identifier.clone())
}

#[test]
fn back_allowed_walks_tree_order() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let from2 = history(&steps, 0..2, &[], false);
        assert_eq!(previous_id(&navigator, &steps[2], &from2).as_deref(), Some("step1"));
        let from3 = history(&steps, 0..3, &[], false);
        assert_eq!(previous_id(&navigator, &steps[3], &from3).as_deref(), Some("step2"));
    }
}

#[test]
fn back_after_jump_returns_to_jump_origin() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);
        // introduction -> step2 and step3 -> step1 are next-rule jumps.
        let result = TaskResult::with_history(
            "task",
            vec![
                StepResult::new("introduction"),
                StepResult::new("step2"),
                StepResult::new("step3"),
                StepResult::new("step1"),
            ],
        );
        assert_eq!(previous_id(&navigator, &steps[1], &result).as_deref(), Some("step3"));
        assert_eq!(previous_id(&navigator, &steps[3], &result).as_deref(), Some("step2"));
        assert_eq!(previous_id(&navigator, &steps[2], &result).as_deref(), Some("introduction"));
    }
}

#[test]
fn back_blocked_from_step7() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = history(&steps, 0..4, &[(4, 0..3), (5, 0..3), (6, 0..3)], false);
        assert!(previous_id(&navigator, &steps[7], &result).is_none());
    }
}

#[test]
fn next_rules_override_tree_order() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);

        let empty = TaskResult::new("task");
        assert_eq!(next_id(&navigator, &steps[0], &empty).as_deref(), Some("step2"));

        let from3 = history(&steps, 0..3, &[], false);
        assert_eq!(next_id(&navigator, &steps[3], &from3).as_deref(), Some("step1"));

        let from5y = history(&steps, 0..4, &[(4, 0..3), (5, 0..1)], false);
        assert_eq!(
            next_id(&navigator, child(&steps, 5, 1), &from5y).as_deref(),
            Some("step7")
        );

        let from5z = history(&steps, 0..4, &[(4, 0..3), (5, 0..2)], false);
        assert_eq!(
            next_id(&navigator, child(&steps, 5, 2), &from5z).as_deref(),
            Some("step4.B")
        );

        let from7 = history(&steps, 0..4, &[(4, 0..3), (5, 0..3), (6, 0..3)], false);
        assert_eq!(next_id(&navigator, &steps[7], &from7).as_deref(), Some("step6.A"));
    }
}

#[test]
fn earlier_targets_move_backward() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = TaskResult::new("task");

        let back = navigator
            .next_step(Some(&steps[3]), &result)
            .expect("step1");
        assert_eq!(back.direction, NavDirection::Backward);
        let ahead = navigator
            .next_step(Some(child(&steps, 5, 1)), &result)
            .expect("step7");
        assert_eq!(ahead.direction, NavDirection::Forward);
    }
}

#[test]
fn missing_next_rule_falls_back_to_tree_order() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = history(&steps, 0..2, &[], false);
        assert_eq!(next_id(&navigator, &steps[2], &result).as_deref(), Some("step3"));
    }
}

#[test]
fn skip_rules_follow_skip_result() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);

        let without = history(&steps, 0..2, &[], false);
        assert_eq!(next_id(&navigator, &steps[1], &without).as_deref(), Some("step2"));
        let with = history(&steps, 0..2, &[], true);
        assert_eq!(next_id(&navigator, &steps[1], &with).as_deref(), Some("step3"));

        let step4c = child(&steps, 4, 2);
        let without = history(&steps, 0..4, &[(4, 0..2)], false);
        assert_eq!(next_id(&navigator, step4c, &without).as_deref(), Some("step5.X"));
        let with = history(&steps, 0..4, &[(4, 0..2)], true);
        assert_eq!(next_id(&navigator, step4c, &with).as_deref(), Some("step5.Y"));
    }
}

#[test]
fn skipped_steps_are_passed_over_backward() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let with = history(&steps, 0..4, &[], true);
        assert_eq!(previous_id(&navigator, &steps[3], &with).as_deref(), Some("step1"));
        assert_eq!(
            previous_id(&navigator, child(&steps, 5, 1), &with).as_deref(),
            Some("step4.c")
        );
    }
}

#[test]
fn skip_to_result_jumps_to_first_leaf_of_section() {
    for steps in step_sets() {
        let navigator = StrategyBasedNavigator::new(&steps, None);
        let result = TaskResult::new("task")
            .add_step_history(StepResult::new("step1").with_skip_to("step6"));

        let transition = navigator
            .next_step(Some(&steps[1]), &result)
            .expect("skip-to target");
        assert_eq!(transition.step.identifier, "step6.A");
        assert_eq!(transition.direction, NavDirection::Forward);
    }
}

#[test]
fn progress_delegates_to_markers() {
    let loaded = parse_task(STRATEGY_TASK_JSON).expect("strategy fixture");
    let navigator = StrategyBasedNavigator::new(&loaded.steps, loaded.progress_markers.clone());
    let result = history(&loaded.steps, 0..2, &[], false);
    let progress = navigator
        .progress(&loaded.steps[2], &result)
        .expect("progress");
    assert_eq!((progress.progress, progress.total, progress.estimated), (2, 7, false));
}

#[test]
fn estimated_progress_on_flat_list() {
    let steps = leaves(&["1", "2", "3", "4"]);
    let navigator = StrategyBasedNavigator::new(&steps, None);
    let result = TaskResult::with_history("task", vec![StepResult::new("1")]);
    let progress = navigator.progress(&steps[1], &result).expect("progress");
    assert_eq!((progress.progress, progress.total, progress.estimated), (2, 4, true));
}

#[test]
fn skippable_step_end_to_end() {
    let steps = vec![
        step("introduction"),
        step("step1"),
        step("step2").with_skip_strategy(SkipWhenResultPresent::new(["skip"])),
        step("step3"),
        section("section4", &["A", "B", "C"]),
    ];
    let navigator = StrategyBasedNavigator::new(&steps, None);

    let without = TaskResult::new("task")
        .add_step_history(StepResult::new("introduction"))
        .add_step_history(StepResult::new("step1"));
    let with = without.add_step_history(StepResult::new("skip"));

    assert_eq!(next_id(&navigator, &steps[1], &without).as_deref(), Some("step2"));
    assert_eq!(next_id(&navigator, &steps[1], &with).as_deref(), Some("step3"));
    assert_eq!(next_id(&navigator, &steps[3], &with).as_deref(), Some("A"));
    assert!(navigator.next_step(Some(&steps[4].steps[2]), &with).is_none());
}

//! Test-only helpers for constructing steps, results and reference tasks.

use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::result::{StepResult, TaskResult};
use crate::step::{DEFAULT_STEP_TYPE, Step};
use crate::strategy::{ConstantBackRule, ConstantNextStep, SkipWhenResultPresent};
use crate::task::Task;

/// Result identifier that triggers the skip rules of [`strategy_steps`].
pub const SKIP_RESULT_IDENTIFIER: &str = "skip";

/// The reference task of [`strategy_steps`] as a task definition file.
pub const STRATEGY_TASK_JSON: &str = r#"{
  "identifier": "strategy",
  "progress_markers": ["step1", "step2", "step3", "step4", "step5", "step6", "step7"],
  "steps": [
    { "identifier": "introduction", "type": "instruction", "next_step_identifier": "step2" },
    { "identifier": "step1", "type": "form" },
    { "identifier": "step2", "type": "form", "skip_if_results": ["skip"] },
    { "identifier": "step3", "type": "form", "next_step_identifier": "step1" },
    { "identifier": "step4", "type": "section", "steps": [
      { "identifier": "step4.A" }, { "identifier": "step4.B" }, { "identifier": "step4.c" }
    ] },
    { "identifier": "step5", "steps": [
      { "identifier": "step5.X", "skip_if_results": ["skip"] },
      { "identifier": "step5.Y", "next_step_identifier": "step7" },
      { "identifier": "step5.Z", "next_step_identifier": "step4.B" }
    ] },
    { "identifier": "step6", "type": "section", "steps": [
      { "identifier": "step6.A" }, { "identifier": "step6.B" }, { "identifier": "step6.c" }
    ] },
    { "identifier": "step7", "type": "active", "back_allowed": false, "next_step_identifier": "step6.A" },
    { "identifier": "conclusion", "type": "completion" }
  ]
}
"#;

/// Create a leaf step with the default type.
pub fn step(id: &str) -> Step {
    Step::new(id, DEFAULT_STEP_TYPE)
}

/// Create one leaf step per identifier.
pub fn leaves(ids: &[&str]) -> Vec<Step> {
    ids.iter().map(|id| step(id)).collect()
}

/// Create a section of leaf steps.
pub fn section(id: &str, child_ids: &[&str]) -> Step {
    Step::section(id, leaves(child_ids))
}

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Task result named `task` holding one plain result per identifier.
pub fn task_result(ids: &[&str]) -> TaskResult {
    TaskResult::with_history("task", ids.iter().map(|id| StepResult::new(*id)).collect())
}

/// Section result covering `range` of the section's substeps.
pub fn section_result(section: &Step, range: Range<usize>) -> StepResult {
    let history = section.steps[range]
        .iter()
        .map(|child| StepResult::new(child.identifier.as_str()))
        .collect();
    StepResult::section(section.identifier.as_str(), history)
}

/// Plain results for `steps`.
pub fn results_for(steps: &[Step]) -> Vec<StepResult> {
    steps
        .iter()
        .map(|step| StepResult::new(step.identifier.as_str()))
        .collect()
}

/// Reference task: four leaves, three sections of three, two closing leaves.
pub fn sample_steps() -> Vec<Step> {
    let mut steps = leaves(&["introduction", "step1", "step2", "step3"]);
    steps.push(section("step4", &["step4.A", "step4.B", "step4.C"]));
    steps.push(section("step5", &["step5.X", "step5.Y", "step5.Z"]));
    steps.push(section("step6", &["step6.A", "step6.B", "step6.C"]));
    steps.extend(leaves(&["step7", "completion"]));
    steps
}

pub fn sample_markers() -> Vec<String> {
    ids(&["step1", "step2", "step3", "step4", "step5", "step6", "step7"])
}

pub fn sample_task() -> Task {
    Task::new("sample", sample_steps()).with_progress_markers(sample_markers())
}

/// Reference task with next, back and skip strategies attached.
///
/// Matches [`STRATEGY_TASK_JSON`].
pub fn strategy_steps() -> Vec<Step> {
    let skip = || SkipWhenResultPresent::new([SKIP_RESULT_IDENTIFIER]);
    vec![
        Step::new("introduction", "instruction")
            .with_next_strategy(ConstantNextStep::new("step2")),
        Step::new("step1", "form"),
        Step::new("step2", "form").with_skip_strategy(skip()),
        Step::new("step3", "form").with_next_strategy(ConstantNextStep::new("step1")),
        section("step4", &["step4.A", "step4.B", "step4.c"]),
        Step::section(
            "step5",
            vec![
                step("step5.X").with_skip_strategy(skip()),
                step("step5.Y").with_next_strategy(ConstantNextStep::new("step7")),
                step("step5.Z").with_next_strategy(ConstantNextStep::new("step4.B")),
            ],
        ),
        section("step6", &["step6.A", "step6.B", "step6.c"]),
        Step::new("step7", "active")
            .with_back_strategy(ConstantBackRule { allowed: false })
            .with_next_strategy(ConstantNextStep::new("step6.A")),
        Step::new("conclusion", "completion"),
    ]
}

/// Create a temporary directory holding `files` (relative name, contents).
#[cfg(feature = "test-support")]
pub fn fixture_dir(files: &[(&str, &str)]) -> std::io::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    for (name, contents) in files {
        write_fixture(dir.path(), name, contents)?;
    }
    Ok(dir)
}

pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> std::io::Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

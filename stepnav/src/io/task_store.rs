//! Task definition loading with schema + invariant validation.
//!
//! Definition files are JSON. Declarative navigation fields
//! (`next_step_identifier`, `back_allowed`, `skip_if_results`) become the
//! matching strategies on the loaded [`Step`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use jsonschema::Draft;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::step::{DEFAULT_STEP_TYPE, SECTION_TYPE, Step};
use crate::strategy::{ConstantBackRule, ConstantNextStep, SkipWhenResultPresent};
use crate::task::Task;

/// JSON Schema (Draft 2020-12) every task definition must satisfy.
pub const TASK_SCHEMA_V1: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/task/v1.schema.json"
));

/// On-disk task definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_markers: Option<Vec<String>>,
    pub steps: Vec<StepDefinition>,
}

/// On-disk step definition. Nested `steps` make a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub identifier: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_allowed: Option<bool>,
    /// Skip this step when the task result holds any of these identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_if_results: Vec<String>,
}

impl TaskDefinition {
    pub fn into_task(self) -> Task {
        let steps = self.steps.into_iter().map(StepDefinition::into_step).collect();
        let task = Task::new(self.identifier, steps);
        match self.progress_markers {
            Some(markers) => task.with_progress_markers(markers),
            None => task,
        }
    }
}

impl StepDefinition {
    pub fn into_step(self) -> Step {
        let step_type = match self.step_type {
            Some(step_type) => step_type,
            None if self.steps.is_empty() => DEFAULT_STEP_TYPE.to_string(),
            None => SECTION_TYPE.to_string(),
        };
        let mut step = Step::new(self.identifier, step_type);
        step.steps = self.steps.into_iter().map(StepDefinition::into_step).collect();

        if let Some(identifier) = self.next_step_identifier {
            step = step.with_next_strategy(ConstantNextStep::new(identifier));
        }
        if let Some(allowed) = self.back_allowed {
            step = step.with_back_strategy(ConstantBackRule { allowed });
        }
        if !self.skip_if_results.is_empty() {
            step = step.with_skip_strategy(SkipWhenResultPresent::new(self.skip_if_results));
        }
        step
    }
}

/// Load and validate a task definition from disk (schema + invariants).
pub fn load_task(path: &Path) -> Result<Task> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read task {}", path.display()))?;
    parse_task(&contents).with_context(|| format!("load task {}", path.display()))
}

/// Parse and validate a task definition.
pub fn parse_task(raw: &str) -> Result<Task> {
    let value: Value = serde_json::from_str(raw).context("parse task json")?;
    validate_schema(&value)?;
    let definition: TaskDefinition =
        serde_json::from_value(value).context("deserialize task definition")?;
    let task = definition.into_task();

    let errors = validate_invariants(&task);
    if !errors.is_empty() {
        bail!("invariant violations:\n- {}", errors.join("\n- "));
    }
    debug!(task = %task.identifier, steps = task.steps.len(), "task loaded");
    Ok(task)
}

/// Validate a JSON instance against the task schema (Draft 2020-12).
fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(TASK_SCHEMA_V1).context("parse task schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile json schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

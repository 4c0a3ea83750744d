//! Accumulated results of a task run, as consumed by the navigators.
//!
//! A `TaskResult` is an immutable snapshot: recording a step produces a new
//! value instead of mutating the old one, so navigators can be queried with
//! any snapshot from any thread.

use serde::{Deserialize, Serialize};

/// Result recorded for one completed step or section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepResult {
    pub identifier: String,
    /// Step the user chose to jump to from this step, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_to_identifier: Option<String>,
    /// Substep results when this result belongs to a section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub step_history: Vec<StepResult>,
}

impl StepResult {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn section(identifier: impl Into<String>, step_history: Vec<StepResult>) -> Self {
        Self {
            step_history,
            ..Self::new(identifier)
        }
    }

    pub fn with_skip_to(mut self, identifier: impl Into<String>) -> Self {
        self.skip_to_identifier = Some(identifier.into());
        self
    }
}

/// Ordered history of a task run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskResult {
    pub identifier: String,
    #[serde(default)]
    pub step_history: Vec<StepResult>,
}

impl TaskResult {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            step_history: Vec::new(),
        }
    }

    pub fn with_history(identifier: impl Into<String>, step_history: Vec<StepResult>) -> Self {
        Self {
            identifier: identifier.into(),
            step_history,
        }
    }

    /// Top-level result with the given identifier.
    pub fn result(&self, identifier: &str) -> Option<&StepResult> {
        self.step_history
            .iter()
            .find(|result| result.identifier == identifier)
    }

    /// Identifiers of the top-level history, in order.
    ///
    /// Section results contribute their own identifier; their substeps are
    /// not walked.
    pub fn history_identifiers(&self) -> impl Iterator<Item = &str> {
        self.step_history
            .iter()
            .map(|result| result.identifier.as_str())
    }

    /// New snapshot with `result` appended, replacing an earlier result of the
    /// same identifier.
    pub fn add_step_history(&self, result: StepResult) -> TaskResult {
        let mut step_history: Vec<StepResult> = self
            .step_history
            .iter()
            .filter(|existing| existing.identifier != result.identifier)
            .cloned()
            .collect();
        step_history.push(result);
        TaskResult {
            identifier: self.identifier.clone(),
            step_history,
        }
    }

    /// New snapshot without the first result named `identifier`.
    pub fn remove_step_history(&self, identifier: &str) -> TaskResult {
        let mut step_history = self.step_history.clone();
        if let Some(index) = step_history
            .iter()
            .position(|result| result.identifier == identifier)
        {
            step_history.remove(index);
        }
        TaskResult {
            identifier: self.identifier.clone(),
            step_history,
        }
    }
}

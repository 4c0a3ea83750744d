//! Optional per-step navigation overrides.
//!
//! A step carries at most one strategy of each kind in its
//! [`StepStrategies`](crate::step::StepStrategies). Only the strategy-based
//! navigator consults them; the ordered and tree navigators ignore them.
//!
//! Closures implement every trait, so ad hoc rules need no named type:
//!
//! ```
//! use stepnav::result::TaskResult;
//! use stepnav::step::Step;
//!
//! let step = Step::new("consent", "form")
//!     .with_skip_strategy(|result: &TaskResult| result.result("consented").is_some());
//! assert!(!step.should_skip(&TaskResult::new("task")));
//! ```

use std::collections::BTreeSet;

use crate::result::TaskResult;

/// Picks the step that follows the step carrying it.
pub trait NextStepStrategy: Send + Sync {
    /// Identifier of the next step, or `None` to fall back to tree order.
    fn next_step_identifier(&self, result: &TaskResult) -> Option<String>;
}

/// Gates backward navigation away from the step carrying it.
pub trait BackStepStrategy: Send + Sync {
    fn is_back_allowed(&self, result: &TaskResult) -> bool;
}

/// Decides whether forward or backward navigation passes over a step.
pub trait SkipStepStrategy: Send + Sync {
    fn should_skip(&self, result: &TaskResult) -> bool;
}

impl<F> NextStepStrategy for F
where
    F: Fn(&TaskResult) -> Option<String> + Send + Sync,
{
    fn next_step_identifier(&self, result: &TaskResult) -> Option<String> {
        self(result)
    }
}

impl<F> BackStepStrategy for F
where
    F: Fn(&TaskResult) -> bool + Send + Sync,
{
    fn is_back_allowed(&self, result: &TaskResult) -> bool {
        self(result)
    }
}

impl<F> SkipStepStrategy for F
where
    F: Fn(&TaskResult) -> bool + Send + Sync,
{
    fn should_skip(&self, result: &TaskResult) -> bool {
        self(result)
    }
}

/// Always navigates to the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantNextStep {
    pub identifier: String,
}

impl ConstantNextStep {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl NextStepStrategy for ConstantNextStep {
    fn next_step_identifier(&self, _result: &TaskResult) -> Option<String> {
        Some(self.identifier.clone())
    }
}

/// Allows or blocks backward navigation regardless of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantBackRule {
    pub allowed: bool,
}

impl BackStepStrategy for ConstantBackRule {
    fn is_back_allowed(&self, _result: &TaskResult) -> bool {
        self.allowed
    }
}

/// Skips the step once any of `identifiers` has a top-level result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipWhenResultPresent {
    pub identifiers: BTreeSet<String>,
}

impl SkipWhenResultPresent {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }
}

impl SkipStepStrategy for SkipWhenResultPresent {
    fn should_skip(&self, result: &TaskResult) -> bool {
        self.identifiers.iter().any(|id| result.result(id).is_some())
    }
}

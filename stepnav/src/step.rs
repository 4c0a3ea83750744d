use std::fmt;
use std::sync::Arc;

use crate::result::TaskResult;
use crate::strategy::{BackStepStrategy, NextStepStrategy, SkipStepStrategy};

/// Type tag of steps that group an ordered list of substeps.
pub const SECTION_TYPE: &str = "section";

/// Type tag given to leaf steps built without an explicit type.
pub const DEFAULT_STEP_TYPE: &str = "step";

/// A node of a task's step tree.
///
/// Leaves are screens (questions, instructions, active steps); sections hold
/// their substeps in display order. Steps are built once and never mutated;
/// navigators borrow them.
#[derive(Clone, Debug)]
pub struct Step {
    pub identifier: String,
    pub step_type: String,
    pub steps: Vec<Step>,
    pub strategies: StepStrategies,
}

/// Navigation overrides attached to a step. Empty slots mean default ordering.
#[derive(Clone, Default)]
pub struct StepStrategies {
    pub next: Option<Arc<dyn NextStepStrategy>>,
    pub back: Option<Arc<dyn BackStepStrategy>>,
    pub skip: Option<Arc<dyn SkipStepStrategy>>,
}

impl StepStrategies {
    pub fn is_empty(&self) -> bool {
        self.next.is_none() && self.back.is_none() && self.skip.is_none()
    }
}

impl fmt::Debug for StepStrategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepStrategies")
            .field("next", &self.next.is_some())
            .field("back", &self.back.is_some())
            .field("skip", &self.skip.is_some())
            .finish()
    }
}

impl Step {
    pub fn new(identifier: impl Into<String>, step_type: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            step_type: step_type.into(),
            steps: Vec::new(),
            strategies: StepStrategies::default(),
        }
    }

    pub fn section(identifier: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Self::new(identifier, SECTION_TYPE)
        }
    }

    pub fn with_next_strategy(mut self, strategy: impl NextStepStrategy + 'static) -> Self {
        self.strategies.next = Some(Arc::new(strategy));
        self
    }

    pub fn with_back_strategy(mut self, strategy: impl BackStepStrategy + 'static) -> Self {
        self.strategies.back = Some(Arc::new(strategy));
        self
    }

    pub fn with_skip_strategy(mut self, strategy: impl SkipStepStrategy + 'static) -> Self {
        self.strategies.skip = Some(Arc::new(strategy));
        self
    }

    pub fn is_section(&self) -> bool {
        self.step_type == SECTION_TYPE
    }

    /// Identifier chosen by the step's next strategy, if it has one that answers.
    pub fn next_step_identifier(&self, result: &TaskResult) -> Option<String> {
        match &self.strategies.next {
            Some(strategy) => strategy.next_step_identifier(result),
            None => None,
        }
    }

    /// Steps without a back strategy always allow backward navigation.
    pub fn is_back_allowed(&self, result: &TaskResult) -> bool {
        match &self.strategies.back {
            Some(strategy) => strategy.is_back_allowed(result),
            None => true,
        }
    }

    pub fn should_skip(&self, result: &TaskResult) -> bool {
        match &self.strategies.skip {
            Some(strategy) => strategy.should_skip(result),
            None => false,
        }
    }

    /// Descend through sections to the first non-section step.
    ///
    /// A section with no substeps resolves to itself.
    pub fn first_leaf(&self) -> &Step {
        let mut current = self;
        while current.is_section() {
            match current.steps.first() {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }
}

/// Strategies are behaviour and take no part in equality.
impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.step_type == other.step_type
            && self.steps == other.steps
    }
}

impl Eq for Step {}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.identifier, self.step_type)
    }
}

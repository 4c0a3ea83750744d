use crate::step::Step;

/// A task definition: its step tree and optional progress markers.
///
/// `progress_markers` of `None` asks navigators to estimate progress from
/// the step count; `Some` with no entries disables marker progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub identifier: String,
    pub steps: Vec<Step>,
    pub progress_markers: Option<Vec<String>>,
}

impl Task {
    pub fn new(identifier: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            identifier: identifier.into(),
            steps,
            progress_markers: None,
        }
    }

    pub fn with_progress_markers(mut self, markers: Vec<String>) -> Self {
        self.progress_markers = Some(markers);
        self
    }
}

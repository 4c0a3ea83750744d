//! Task result snapshots on disk (JSON).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::result::TaskResult;

/// Load a task result snapshot.
pub fn load_task_result(path: &Path) -> Result<TaskResult> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read result {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse result {}", path.display()))
}

/// Load a snapshot, or start an empty one named `task_identifier` when the
/// file does not exist yet.
pub fn load_or_empty(path: &Path, task_identifier: &str) -> Result<TaskResult> {
    if !path.exists() {
        return Ok(TaskResult::new(task_identifier));
    }
    load_task_result(path)
}

/// Atomically write a task result snapshot (temp file + rename).
pub fn write_task_result(path: &Path, result: &TaskResult) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(result).context("serialize task result")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

//! Stable exit codes for stepnav CLI commands.

/// Command succeeded and produced a step or progress value.
pub const OK: i32 = 0;
/// Command failed due to an invalid task, result, config or unknown step.
pub const INVALID: i32 = 1;
/// Navigation reached an end: no next/previous step, or no progress to show.
pub const END: i32 = 2;

//! Step navigation engine for multi-step active tasks.
//!
//! Given a task's step tree (leaves and nested sections) and the results
//! recorded so far, a navigator decides which step comes next, which came
//! before, and how far into the task the user is. The architecture enforces
//! a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (node arena, traversal orders,
//!   shorthand lookup, progress). No I/O, fully testable in isolation.
//! - **[`navigator`]**: The ordered, tree and strategy-based navigators built
//!   on `core`, plus the factory choosing between them.
//! - **[`io`]**: Loading task definitions, task results and configuration.
//!
//! [`query`] coordinates loading with navigation to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod navigator;
pub mod query;
pub mod result;
pub mod step;
pub mod strategy;
pub mod task;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

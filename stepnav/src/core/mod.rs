//! Deterministic, pure logic shared by the navigators.
//!
//! Core modules must be free of I/O side effects. They operate on borrowed
//! step trees and result snapshots and return deterministic outputs suitable
//! for tests.

pub mod invariants;
pub mod path;
pub mod progress;
pub mod shorthand;
pub mod tree;

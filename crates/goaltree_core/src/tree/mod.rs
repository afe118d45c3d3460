//! Pure tree logic over goal forests.
//!
//! # Responsibility
//! - Locate and mutate nodes anywhere in a goal forest.
//! - Derive display progress and non-leaf completion from subtrees.
//!
//! # Invariants
//! - Nothing in this module performs I/O or touches persistence.

pub mod mutate;
pub mod progress;

//! Goal and category records.
//!
//! # Responsibility
//! - Define the rooted-forest shapes persisted as the forest payload.
//! - Provide constructors that establish id and completion defaults.
//!
//! # Invariants
//! - `id` values are globally unique across the whole forest.
//! - A goal with empty `sub_goals` is a leaf; only leaves carry
//!   user-authoritative completion state.
//! - Sibling order is insertion order and is the display order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a goal node.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GoalId = Uuid;

/// Stable identifier for a top-level category.
pub type CategoryId = Uuid;

/// The whole persisted state: every category with its nested goal trees.
pub type Forest = Vec<Category>;

/// One node in a goal tree.
///
/// `is_completed` is user-set only while the goal is a leaf; once the goal
/// has children, completion sync re-derives the flag from them after every
/// structural mutation.
///
/// Serialized with camelCase keys to match the historical payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub is_completed: bool,
    pub sub_goals: Vec<Goal>,
}

impl Goal {
    /// Creates a leaf goal with a generated stable id.
    ///
    /// # Invariants
    /// - `is_completed` starts as `false`.
    /// - `sub_goals` starts empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a leaf goal with a caller-provided stable id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: GoalId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_completed: false,
            sub_goals: Vec::new(),
        }
    }

    /// Returns whether this goal has no sub-goals.
    pub fn is_leaf(&self) -> bool {
        self.sub_goals.is_empty()
    }
}

/// Top-level grouping owning an ordered list of goal trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub goals: Vec<Goal>,
}

impl Category {
    /// Creates an empty category with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an empty category with a caller-provided stable id.
    pub fn with_id(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            goals: Vec::new(),
        }
    }
}

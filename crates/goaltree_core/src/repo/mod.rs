//! Persistence layer for the goal forest.
//!
//! # Responsibility
//! - Define the storage contract the orchestrator depends on.
//! - Isolate SQLite and payload-format details from business logic.
//!
//! # Invariants
//! - Persistence is whole-forest; there are no incremental writes.

pub mod forest_repo;

//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate tree mutations, completion sync and persistence into
//!   caller-facing entry points.
//! - Keep UI layers decoupled from storage and suggestion details.

pub mod goal_service;

//! Sub-goal suggestion contracts.
//!
//! # Responsibility
//! - Define the injectable client interface used by the orchestrator.
//! - Classify suggestion failures for the calling surface.
//!
//! # Invariants
//! - A missing credential fails before any network attempt.
//! - Zero suggestions is a valid outcome, never an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod gemini;

pub use gemini::GeminiSuggestionClient;

pub type SuggestResult<T> = Result<T, SuggestError>;

/// Failures surfaced by suggestion clients.
#[derive(Debug)]
pub enum SuggestError {
    /// No API credential is configured; the request was never sent.
    MissingCredential,
    /// The remote call failed, returned a non-success status, or timed out.
    Remote(String),
    /// The remote call succeeded but the payload is not the expected shape.
    InvalidResponse(String),
}

impl Display for SuggestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential => {
                write!(f, "suggestion service credential is not configured")
            }
            Self::Remote(message) => write!(f, "suggestion request failed: {message}"),
            Self::InvalidResponse(message) => {
                write!(f, "suggestion response is malformed: {message}")
            }
        }
    }
}

impl Error for SuggestError {}

/// Remote generator of sub-goal names for a parent goal.
///
/// Injected into the orchestrator so tests substitute it freely.
pub trait SuggestionClient {
    /// Returns short sub-goal names for `parent_name`, possibly empty.
    fn suggest_sub_goals(&self, parent_name: &str) -> SuggestResult<Vec<String>>;
}

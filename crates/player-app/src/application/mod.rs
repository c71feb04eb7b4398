//! Application layer - Use cases and orchestration

pub mod error;
pub mod services;

// Re-export common types
pub use error::{FailureKind, SubmissionError, UnauthenticatedReason};

//! Errant Dreams player application layer.
//!
//! Drives the character creation wizard on behalf of a presentation shell and
//! submits the finished selection through the outbound ports.

pub mod application;

pub use application::error::{FailureKind, SubmissionError, UnauthenticatedReason};
pub use application::services::{
    CharacterCreationService, PendingSubmission, SessionService, SubmissionCoordinator,
    SubmissionOutcome,
};

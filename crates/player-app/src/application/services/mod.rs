//! Application services
//!
//! - [`CharacterCreationService`]: wizard + submission facade for the shell
//! - [`SubmissionCoordinator`]: single-flight submission bookkeeping
//! - [`SessionService`]: stored credential and cached character

mod character_creation_service;
mod session_service;
mod submission_coordinator;

pub use character_creation_service::CharacterCreationService;
pub use session_service::SessionService;
pub use submission_coordinator::{PendingSubmission, SubmissionCoordinator, SubmissionOutcome};

//! Service layer error types
//!
//! Every `SubmissionError` displays as a message fit to show the user as-is.
//! None of them are fatal: the wizard keeps its selection and the user can
//! retry.

use std::fmt;

use errant_domain::DomainError;
use thiserror::Error;

/// Why a submission could not be authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    /// No credential has been stored (the user never logged in)
    MissingCredential,
    /// The server rejected the stored credential; it has been cleared
    CredentialRejected,
}

impl fmt::Display for UnauthenticatedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "Please log in to continue."),
            Self::CredentialRejected => {
                write!(f, "Your session has expired. Please log in again.")
            }
        }
    }
}

/// Which stage of a submission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with `success: false`
    Rejected,
    /// The server claimed success but sent no character
    MalformedResponse,
    /// No usable response (network, timeout, unexpected status)
    Transport,
}

/// Errors from submitting a completed selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Submit was invoked before the wizard was ready; the caller should
    /// have checked `can_submit`
    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    Unauthenticated(UnauthenticatedReason),

    #[error("{message}")]
    SubmissionFailed { kind: FailureKind, message: String },

    /// A previous submission has not returned yet
    #[error("Your character is already being created. Please wait.")]
    SubmissionInProgress,

    #[error("{0}")]
    InvalidName(#[from] DomainError),
}

impl SubmissionError {
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::SubmissionFailed {
            kind,
            message: message.into(),
        }
    }

    /// Programming errors are not expected to reach a user.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::PreconditionFailed(_))
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

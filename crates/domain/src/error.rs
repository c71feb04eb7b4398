//! Unified error types for the domain layer
//!
//! `DomainError` covers catalog construction, catalog lookups and name
//! validation. `SelectionError` covers the creation wizard's transitions and
//! is what the presentation layer turns into user-facing messages.

use thiserror::Error;

use crate::creation::WizardStep;

/// Error type for catalog and value-object operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Key outside the catalog's fixed enumerations
    #[error("{entity_type} not found: {name}")]
    NotFound {
        entity_type: &'static str,
        name: String,
    },

    /// Catalog invariant violation detected while building a catalog
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            name: name.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised by the selection state machine.
///
/// Every variant except `NotFound` is user-recoverable: the wizard state is
/// left exactly as it was before the failed call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The choice is not legal given the upstream selections
    #[error("{0}")]
    InvalidChoice(String),

    /// `advance` was called before the current stage's field was set
    #[error("Please choose a {} before continuing.", .0.noun())]
    IncompleteStep(WizardStep),

    /// `retreat` was called on the first stage
    #[error("Already at the first step")]
    InitialStep,

    /// `advance` was called on the last stage
    #[error("Already at the final step")]
    TerminalStep,

    /// The caller referenced something the catalog does not contain
    #[error(transparent)]
    NotFound(#[from] DomainError),
}

impl SelectionError {
    pub fn invalid_choice(msg: impl Into<String>) -> Self {
        Self::InvalidChoice(msg.into())
    }

    /// Programming errors are not expected to reach a user.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

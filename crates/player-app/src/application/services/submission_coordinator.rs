//! Submission coordinator - turns a completed wizard into one creation request
//!
//! Split in two so the network call can happen between the halves without
//! holding any lock:
//!
//! 1. [`SubmissionCoordinator::begin`] checks preconditions, marks a request
//!    as in flight and captures the wizard revision as the submission token.
//! 2. [`SubmissionCoordinator::finish`] clears the in-flight mark and
//!    interprets the API result, discarding it if the wizard has changed
//!    since dispatch.

use errant_domain::{CharacterName, CreationWizard};
use errant_player_ports::outbound::{ApiError, Credential};
use errant_player_ports::{CharacterRecord, CreateCharacterRequest, CreateCharacterResponse};

use crate::application::error::{FailureKind, SubmissionError, UnauthenticatedReason};

/// A dispatched request waiting for its response
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    token: u64,
    credential: Credential,
    request: CreateCharacterRequest,
    name: CharacterName,
}

impl PendingSubmission {
    /// Wizard revision captured at dispatch
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn request(&self) -> &CreateCharacterRequest {
        &self.request
    }

    pub fn name(&self) -> &CharacterName {
        &self.name
    }
}

/// Result of a submission that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The character exists; `message` is ready to show the user
    Created {
        record: CharacterRecord,
        message: String,
    },
    /// The wizard changed while the request was in flight; the response was
    /// dropped without effect
    Superseded,
}

/// Tracks the single in-flight submission
#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    in_flight: Option<u64>,
}

impl SubmissionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Prepare a request from the wizard's completed selection.
    ///
    /// `name_override` replaces the derived `"<race> <class>"` name unless it
    /// is blank.
    pub fn begin(
        &mut self,
        wizard: &CreationWizard,
        credential: Option<Credential>,
        name_override: Option<&str>,
    ) -> Result<PendingSubmission, SubmissionError> {
        if self.in_flight.is_some() {
            return Err(SubmissionError::SubmissionInProgress);
        }

        let selection = wizard.completed().ok_or_else(|| {
            SubmissionError::PreconditionFailed(format!(
                "Cannot submit from the {} step without a complete selection",
                wizard.step()
            ))
        })?;
        let credential = credential.ok_or(SubmissionError::Unauthenticated(
            UnauthenticatedReason::MissingCredential,
        ))?;
        let name = CharacterName::resolve(name_override, &selection.race, &selection.class)?;

        let token = wizard.revision();
        self.in_flight = Some(token);

        Ok(PendingSubmission {
            token,
            request: CreateCharacterRequest::new(&selection, &name),
            credential,
            name,
        })
    }

    /// Release the in-flight mark for a submission whose response will never
    /// be read, e.g. because the caller dropped the future.
    ///
    /// Only clears the mark if it still belongs to `token`.
    pub fn abandon(&mut self, token: u64) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Interpret the response to `pending`.
    ///
    /// `current_revision` is the wizard's revision now; if it differs from the
    /// token captured at dispatch the result is discarded as `Superseded`.
    pub fn finish(
        &mut self,
        pending: PendingSubmission,
        result: Result<CreateCharacterResponse, ApiError>,
        current_revision: u64,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        self.in_flight = None;

        if pending.token != current_revision {
            return Ok(SubmissionOutcome::Superseded);
        }

        match result {
            Ok(CreateCharacterResponse {
                success: true,
                message,
                character: Some(record),
            }) => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| {
                        let name = record.name().unwrap_or(pending.name.as_str());
                        format!("Welcome, {}! Your legend begins...", name)
                    });
                Ok(SubmissionOutcome::Created { record, message })
            }
            Ok(CreateCharacterResponse {
                success: true,
                character: None,
                ..
            }) => Err(SubmissionError::failed(
                FailureKind::MalformedResponse,
                "The server did not return your character. Please try again.",
            )),
            Ok(CreateCharacterResponse {
                success: false,
                message,
                ..
            }) => Err(SubmissionError::failed(
                FailureKind::Rejected,
                message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Failed to create character.".to_string()),
            )),
            Err(ApiError::Unauthorized(_)) => Err(SubmissionError::Unauthenticated(
                UnauthenticatedReason::CredentialRejected,
            )),
            Err(e) => Err(SubmissionError::failed(
                FailureKind::Transport,
                format!("Failed to create character. Please try again. ({})", e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errant_domain::{Catalog, ClassName, FactionName, RaceName};
    use serde_json::json;
    use std::sync::Arc;

    fn ready_wizard() -> CreationWizard {
        let mut wizard = CreationWizard::new(Arc::new(Catalog::standard().unwrap()));
        wizard
            .select_faction(&FactionName::new("The Crusaders").unwrap())
            .unwrap();
        wizard.advance().unwrap();
        wizard
            .select_race(&RaceName::new("Castilian").unwrap())
            .unwrap();
        wizard.advance().unwrap();
        wizard
            .select_class(&ClassName::new("Knight").unwrap())
            .unwrap();
        wizard
    }

    fn credential() -> Option<Credential> {
        Credential::new("tok-1")
    }

    fn record(name: &str) -> CharacterRecord {
        CharacterRecord::new(json!({ "id": 1, "name": name, "level": 1 }))
    }

    #[test]
    fn begin_builds_request_with_derived_name() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();

        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        assert_eq!(pending.request().faction, "The Crusaders");
        assert_eq!(pending.request().race, "Castilian");
        assert_eq!(pending.request().character_class, "Knight");
        assert_eq!(pending.request().name, "Castilian Knight");
        assert_eq!(pending.token(), wizard.revision());
        assert!(coordinator.is_in_flight());
    }

    #[test]
    fn begin_uses_name_override() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();

        let pending = coordinator
            .begin(&wizard, credential(), Some("  Rodrigo  "))
            .unwrap();

        assert_eq!(pending.request().name, "Rodrigo");
    }

    #[test]
    fn begin_before_final_step_is_precondition_failure() {
        let mut wizard = CreationWizard::new(Arc::new(Catalog::standard().unwrap()));
        wizard
            .select_faction(&FactionName::new("The Moors").unwrap())
            .unwrap();
        let mut coordinator = SubmissionCoordinator::new();

        let err = coordinator.begin(&wizard, credential(), None).unwrap_err();

        assert!(err.is_programming_error());
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn begin_without_credential_is_unauthenticated() {
        let mut coordinator = SubmissionCoordinator::new();
        let err = coordinator.begin(&ready_wizard(), None, None).unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Unauthenticated(UnauthenticatedReason::MissingCredential)
        );
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn second_begin_while_in_flight_is_rejected() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        coordinator.begin(&wizard, credential(), None).unwrap();

        let err = coordinator.begin(&wizard, credential(), None).unwrap_err();

        assert_eq!(err, SubmissionError::SubmissionInProgress);
    }

    #[test]
    fn abandon_releases_only_the_matching_submission() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        assert!(!coordinator.abandon(pending.token() + 1));
        assert!(coordinator.is_in_flight());

        assert!(coordinator.abandon(pending.token()));
        assert!(!coordinator.is_in_flight());
        assert!(coordinator.begin(&wizard, credential(), None).is_ok());
    }

    #[test]
    fn oversized_override_is_invalid_name() {
        let mut coordinator = SubmissionCoordinator::new();
        let long = "a".repeat(300);
        let err = coordinator
            .begin(&ready_wizard(), credential(), Some(&long))
            .unwrap_err();
        assert!(matches!(err, SubmissionError::InvalidName(_)));
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn success_with_record_is_created() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        let outcome = coordinator
            .finish(
                pending,
                Ok(CreateCharacterResponse::created(
                    "Welcome, Castilian Knight! Your legend begins...",
                    record("Castilian Knight"),
                )),
                wizard.revision(),
            )
            .unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Created {
                record: record("Castilian Knight"),
                message: "Welcome, Castilian Knight! Your legend begins...".to_string(),
            }
        );
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn success_without_message_gets_default_welcome() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        let response = CreateCharacterResponse {
            success: true,
            message: None,
            character: Some(record("Ximena")),
        };
        let outcome = coordinator
            .finish(pending, Ok(response), wizard.revision())
            .unwrap();

        let SubmissionOutcome::Created { message, .. } = outcome else {
            panic!("expected Created");
        };
        assert_eq!(message, "Welcome, Ximena! Your legend begins...");
    }

    #[test]
    fn success_without_record_is_malformed() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        let response = CreateCharacterResponse {
            success: true,
            message: Some("ok".to_string()),
            character: None,
        };
        let err = coordinator
            .finish(pending, Ok(response), wizard.revision())
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::SubmissionFailed {
                kind: FailureKind::MalformedResponse,
                ..
            }
        ));
    }

    #[test]
    fn explicit_failure_carries_server_message() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        let err = coordinator
            .finish(
                pending,
                Ok(CreateCharacterResponse::rejected(
                    "You already have an active character. Only one character per account is allowed.",
                )),
                wizard.revision(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            SubmissionError::failed(
                FailureKind::Rejected,
                "You already have an active character. Only one character per account is allowed."
            )
        );
    }

    #[test]
    fn unauthorized_maps_to_credential_rejected() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        let err = coordinator
            .finish(
                pending,
                Err(ApiError::Unauthorized(
                    "Invalid or expired authentication token.".to_string(),
                )),
                wizard.revision(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            SubmissionError::Unauthenticated(UnauthenticatedReason::CredentialRejected)
        );
    }

    #[test]
    fn transport_failure_is_distinct_kind() {
        let wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        let err = coordinator
            .finish(
                pending,
                Err(ApiError::RequestFailed("connection refused".to_string())),
                wizard.revision(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::SubmissionFailed {
                kind: FailureKind::Transport,
                ..
            }
        ));
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn stale_token_is_superseded_even_on_success() {
        let mut wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        wizard.retreat().unwrap();

        let outcome = coordinator
            .finish(
                pending,
                Ok(CreateCharacterResponse::created("hi", record("Castilian Knight"))),
                wizard.revision(),
            )
            .unwrap();
        assert_eq!(outcome, SubmissionOutcome::Superseded);
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn stale_token_swallows_errors_too() {
        let mut wizard = ready_wizard();
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator.begin(&wizard, credential(), None).unwrap();

        wizard.reset();

        let outcome = coordinator.finish(
            pending,
            Err(ApiError::RequestFailed("timeout".to_string())),
            wizard.revision(),
        );
        assert_eq!(outcome, Ok(SubmissionOutcome::Superseded));
    }
}

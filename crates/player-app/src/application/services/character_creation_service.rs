//! Character Creation Service - the wizard as the presentation layer sees it
//!
//! Owns one `CreationWizard` and one `SubmissionCoordinator` behind a mutex.
//! The lock is never held across the API call, so selection changes made
//! while a submission is outstanding go through and make its result stale.

use std::sync::{Arc, Mutex, MutexGuard};

use errant_domain::{
    Catalog, ClassName, CreationWizard, FactionName, RaceName, Selection, SelectionError,
    StepOptions, StepValidation, WizardStep,
};
use errant_player_ports::outbound::{
    ApiError, CharacterApiPort, Destination, NavigationPort, Notice, NotificationPort,
};
use errant_player_ports::CharacterRecord;

use super::session_service::SessionService;
use super::submission_coordinator::{SubmissionCoordinator, SubmissionOutcome};
use crate::application::error::{FailureKind, SubmissionError, UnauthenticatedReason};

struct CreationState {
    wizard: CreationWizard,
    coordinator: SubmissionCoordinator,
}

fn lock_state(state: &Mutex<CreationState>) -> MutexGuard<'_, CreationState> {
    // No invariant can be left half-updated by a panic here: every wizard
    // mutation validates before it writes.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Releases the in-flight mark if `submit` is dropped before its response
/// is read.
struct InFlightGuard<'a> {
    state: &'a Mutex<CreationState>,
    token: u64,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(state: &'a Mutex<CreationState>, token: u64) -> Self {
        Self {
            state,
            token,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed && lock_state(self.state).coordinator.abandon(self.token) {
            tracing::warn!(token = self.token, "Submission dropped before its response arrived");
        }
    }
}

/// Character creation use cases
pub struct CharacterCreationService {
    api: Arc<dyn CharacterApiPort>,
    session: SessionService,
    navigation: Arc<dyn NavigationPort>,
    notifications: Arc<dyn NotificationPort>,
    state: Mutex<CreationState>,
}

impl CharacterCreationService {
    pub fn new(
        catalog: Arc<Catalog>,
        api: Arc<dyn CharacterApiPort>,
        session: SessionService,
        navigation: Arc<dyn NavigationPort>,
        notifications: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            api,
            session,
            navigation,
            notifications,
            state: Mutex::new(CreationState {
                wizard: CreationWizard::new(catalog),
                coordinator: SubmissionCoordinator::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, CreationState> {
        lock_state(&self.state)
    }

    pub fn step(&self) -> WizardStep {
        self.state().wizard.step()
    }

    pub fn selection(&self) -> Selection {
        self.state().wizard.selection().clone()
    }

    pub fn revision(&self) -> u64 {
        self.state().wizard.revision()
    }

    pub fn current_options(&self) -> StepOptions {
        self.state().wizard.current_options()
    }

    pub fn validation(&self) -> StepValidation {
        self.state().wizard.validation()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().coordinator.is_in_flight()
    }

    pub fn select_faction(&self, faction: &FactionName) -> Result<(), SelectionError> {
        let result = self.state().wizard.select_faction(faction);
        self.after_selection("select_faction", faction.as_str(), result)
    }

    pub fn select_race(&self, race: &RaceName) -> Result<(), SelectionError> {
        let result = self.state().wizard.select_race(race);
        self.after_selection("select_race", race.as_str(), result)
    }

    pub fn select_class(&self, class: &ClassName) -> Result<(), SelectionError> {
        let result = self.state().wizard.select_class(class);
        self.after_selection("select_class", class.as_str(), result)
    }

    pub fn advance(&self) -> Result<WizardStep, SelectionError> {
        let result = self.state().wizard.advance();
        self.after_navigation("advance", result)
    }

    pub fn retreat(&self) -> Result<WizardStep, SelectionError> {
        let result = self.state().wizard.retreat();
        self.after_navigation("retreat", result)
    }

    /// Abandon the wizard, e.g. when the user navigates away.
    ///
    /// An outstanding submission keeps running but its result is discarded.
    pub fn reset(&self) {
        self.state().wizard.reset();
        tracing::debug!("Creation wizard reset");
    }

    /// Submit the completed selection.
    ///
    /// Exactly one request is made per successful `begin`; there is no retry.
    /// Dropping the returned future while it waits releases the in-flight
    /// mark, so a later submit is not blocked. Every failure is also sent to the notification port, and on success the
    /// character is cached and the shell is sent to the start screen.
    pub async fn submit(
        &self,
        name_override: Option<&str>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let credential = self.session.credential();
        let begun = {
            let mut state = self.state();
            let CreationState {
                wizard,
                coordinator,
            } = &mut *state;
            coordinator.begin(wizard, credential, name_override)
        };
        let pending = match begun {
            Ok(pending) => pending,
            Err(e) => return Err(self.report_submission_error(e)),
        };

        let mut guard = InFlightGuard::new(&self.state, pending.token());
        tracing::info!(
            faction = %pending.request().faction,
            race = %pending.request().race,
            class = %pending.request().character_class,
            token = pending.token(),
            "Submitting character creation"
        );
        let result = self
            .api
            .create_character(pending.credential(), pending.request())
            .await;

        let finished = {
            let mut state = self.state();
            guard.disarm();
            let current = state.wizard.revision();
            state.coordinator.finish(pending, result, current)
        };

        match finished {
            Ok(SubmissionOutcome::Created { record, message }) => {
                tracing::info!(character = ?record.name(), "Character created");
                self.session.remember_character(&record);
                self.notifications.notify(Notice::success(message.clone()));
                self.navigation.navigate(Destination::Start);
                Ok(SubmissionOutcome::Created { record, message })
            }
            Ok(SubmissionOutcome::Superseded) => {
                tracing::warn!("Discarding creation response: selection changed while in flight");
                Ok(SubmissionOutcome::Superseded)
            }
            Err(e) => Err(self.report_submission_error(e)),
        }
    }

    /// The account's active character, if it already has one.
    ///
    /// The API allows one active character per account, so a shell calls this
    /// before offering the wizard at all.
    pub async fn existing_character(&self) -> Result<Option<CharacterRecord>, SubmissionError> {
        let Some(credential) = self.session.credential() else {
            return Err(self.report_submission_error(SubmissionError::Unauthenticated(
                UnauthenticatedReason::MissingCredential,
            )));
        };

        match self.api.active_character(&credential).await {
            Ok(Some(record)) => {
                tracing::debug!(character = ?record.name(), "Found active character");
                self.session.remember_character(&record);
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(ApiError::Unauthorized(_)) => Err(self.report_submission_error(
                SubmissionError::Unauthenticated(UnauthenticatedReason::CredentialRejected),
            )),
            Err(e) => Err(self.report_submission_error(SubmissionError::failed(
                FailureKind::Transport,
                format!("Failed to load character. Please try again. ({})", e),
            ))),
        }
    }

    fn after_selection(
        &self,
        operation: &'static str,
        choice: &str,
        result: Result<(), SelectionError>,
    ) -> Result<(), SelectionError> {
        match &result {
            Ok(()) => tracing::debug!(operation, choice, "Selection updated"),
            Err(e) => self.report_selection_error(operation, e),
        }
        result
    }

    fn after_navigation(
        &self,
        operation: &'static str,
        result: Result<WizardStep, SelectionError>,
    ) -> Result<WizardStep, SelectionError> {
        match &result {
            Ok(step) => tracing::debug!(operation, step = %step, "Wizard moved"),
            Err(e) => self.report_selection_error(operation, e),
        }
        result
    }

    fn report_selection_error(&self, operation: &'static str, error: &SelectionError) {
        if error.is_programming_error() {
            tracing::error!(operation, error = %error, "Selection outside the catalog");
            return;
        }
        tracing::debug!(operation, error = %error, "Selection rejected");
        self.notifications.notify(Notice::error(error.to_string()));
    }

    fn report_submission_error(&self, error: SubmissionError) -> SubmissionError {
        if error.is_programming_error() {
            tracing::error!(error = %error, "Submission invoked before the wizard was ready");
            return error;
        }
        if matches!(
            error,
            SubmissionError::Unauthenticated(UnauthenticatedReason::CredentialRejected)
        ) {
            self.session.clear();
        }
        tracing::warn!(error = %error, "Character creation failed");
        self.notifications.notify(Notice::error(error.to_string()));
        error
    }
}

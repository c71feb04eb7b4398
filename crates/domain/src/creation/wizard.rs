//! Selection state machine for the character creation wizard

use std::sync::Arc;

use super::selection::{CompletedSelection, Selection};
use super::step::WizardStep;
use super::validator::{self, StepOptions, StepValidation};
use crate::catalog::Catalog;
use crate::error::SelectionError;
use crate::value_objects::{ClassName, FactionName, RaceName};

/// Walks a user through faction → race → class.
///
/// Invariants, checked after every mutation:
/// - `race` is only set to a race of the selected faction
/// - `class` is only set to a class eligible for the selected race
/// - changing or clearing a field clears every field downstream of it
/// - every stage before the current one has its field set
///
/// `revision` increases whenever the selection changes; an in-flight
/// submission compares it against the value captured at dispatch to detect
/// that its result is stale.
#[derive(Debug, Clone)]
pub struct CreationWizard {
    catalog: Arc<Catalog>,
    step: WizardStep,
    selection: Selection,
    revision: u64,
}

impl CreationWizard {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            step: WizardStep::Faction,
            selection: Selection::default(),
            revision: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Select a faction, clearing race and class.
    ///
    /// If the wizard is past the Race stage it moves back to it.
    pub fn select_faction(&mut self, faction: &FactionName) -> Result<(), SelectionError> {
        self.catalog.faction(faction)?;

        self.selection.set_faction(faction.clone());
        self.settle_after_change(WizardStep::Faction);
        Ok(())
    }

    /// Select a race of the current faction, clearing class.
    pub fn select_race(&mut self, race: &RaceName) -> Result<(), SelectionError> {
        let entry = self.catalog.race(race)?;
        let Some(faction) = self.selection.faction() else {
            return Err(SelectionError::invalid_choice(
                "Choose a faction before choosing a race.",
            ));
        };
        if !entry.belongs_to(faction) {
            let roster = self.catalog.races_of(faction)?;
            let names: Vec<&str> = roster.iter().map(|r| r.name().as_str()).collect();
            return Err(SelectionError::invalid_choice(format!(
                "{} do not march with {}. Available races: {}",
                race,
                faction,
                names.join(", ")
            )));
        }

        self.selection.set_race(race.clone());
        self.settle_after_change(WizardStep::Race);
        Ok(())
    }

    /// Select a class eligible for the current race.
    pub fn select_class(&mut self, class: &ClassName) -> Result<(), SelectionError> {
        self.catalog.class(class)?;
        let Some(race) = self.selection.race() else {
            return Err(SelectionError::invalid_choice(
                "Choose a race before choosing a class.",
            ));
        };
        if !self.catalog.is_eligible(race, class) {
            let allowed = self.catalog.eligible_classes(race)?;
            let names: Vec<&str> = allowed.iter().map(ClassName::as_str).collect();
            let available = if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            };
            return Err(SelectionError::invalid_choice(format!(
                "{} cannot be a {}. Available classes: {}",
                race, class, available
            )));
        }

        self.selection.set_class(class.clone());
        self.settle_after_change(WizardStep::Class);
        Ok(())
    }

    /// Move forward one stage. Requires the current stage's field.
    pub fn advance(&mut self) -> Result<WizardStep, SelectionError> {
        if !self.selection.is_set(self.step.field()) {
            return Err(SelectionError::IncompleteStep(self.step));
        }
        let next = self.step.next().ok_or(SelectionError::TerminalStep)?;
        self.step = next;
        Ok(next)
    }

    /// Move back one stage, clearing the field of the stage being left and
    /// every stage after it. The target stage keeps its choice.
    pub fn retreat(&mut self) -> Result<WizardStep, SelectionError> {
        let target = self.step.previous().ok_or(SelectionError::InitialStep)?;
        for field in target.rule().cleared_on_reentry {
            self.selection.clear(*field);
        }
        self.step = target;
        self.revision += 1;
        Ok(target)
    }

    /// Abandon the current selection and start over.
    pub fn reset(&mut self) {
        self.step = WizardStep::Faction;
        self.selection = Selection::default();
        self.revision += 1;
    }

    /// The options selectable at the current stage
    pub fn current_options(&self) -> StepOptions {
        validator::options_for(&self.catalog, self.step, &self.selection)
    }

    pub fn validation(&self) -> StepValidation {
        validator::validate(self.step, &self.selection)
    }

    /// The completed triple when the wizard is ready to submit
    pub fn completed(&self) -> Option<CompletedSelection> {
        if !self.step.is_terminal() {
            return None;
        }
        self.selection.complete()
    }

    /// After `changed`'s field is set, the first stage that may now be empty
    /// is the one after it; never leave the wizard beyond that stage.
    fn settle_after_change(&mut self, changed: WizardStep) {
        let resume = changed.next().unwrap_or(changed);
        if self.step > resume {
            self.step = resume;
        }
        self.revision += 1;
    }
}

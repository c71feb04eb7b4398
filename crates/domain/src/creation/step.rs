//! Wizard stages and their transition table
//!
//! # State Transitions
//!
//! ```text
//! Faction --advance--> Race --advance--> Class
//! Faction <--retreat-- Race <--retreat-- Class
//! ```
//!
//! Every rule lives in [`TRANSITIONS`]; the wizard never branches on a stage
//! to decide what to clear.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered stage of the creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Faction,
    Race,
    Class,
}

/// A field of the selection under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionField {
    Faction,
    Race,
    Class,
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRule {
    pub step: WizardStep,
    /// The selection field this stage fills in
    pub field: SelectionField,
    pub next: Option<WizardStep>,
    pub previous: Option<WizardStep>,
    /// Fields cleared when the wizard steps back onto this stage, and when
    /// this stage's own field changes
    pub cleared_on_reentry: &'static [SelectionField],
}

const TRANSITIONS: [StepRule; 3] = [
    StepRule {
        step: WizardStep::Faction,
        field: SelectionField::Faction,
        next: Some(WizardStep::Race),
        previous: None,
        cleared_on_reentry: &[SelectionField::Race, SelectionField::Class],
    },
    StepRule {
        step: WizardStep::Race,
        field: SelectionField::Race,
        next: Some(WizardStep::Class),
        previous: Some(WizardStep::Faction),
        cleared_on_reentry: &[SelectionField::Class],
    },
    StepRule {
        step: WizardStep::Class,
        field: SelectionField::Class,
        next: None,
        previous: Some(WizardStep::Race),
        cleared_on_reentry: &[],
    },
];

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Faction, WizardStep::Race, WizardStep::Class];

    pub fn rule(self) -> &'static StepRule {
        &TRANSITIONS[self as usize]
    }

    pub fn next(self) -> Option<WizardStep> {
        self.rule().next
    }

    pub fn previous(self) -> Option<WizardStep> {
        self.rule().previous
    }

    pub fn field(self) -> SelectionField {
        self.rule().field
    }

    #[inline]
    pub fn is_initial(self) -> bool {
        self.previous().is_none()
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Lower-case noun used in user-facing messages
    pub fn noun(self) -> &'static str {
        match self {
            Self::Faction => "faction",
            Self::Race => "race",
            Self::Class => "class",
        }
    }

    /// Heading shown above the stage's options
    pub fn title(self) -> &'static str {
        match self {
            Self::Faction => "Choose Your Allegiance",
            Self::Race => "Choose Your Origins",
            Self::Class => "Choose Your Calling",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.noun())
    }
}

impl SelectionField {
    /// The stage that owns this field
    pub fn step(self) -> WizardStep {
        match self {
            Self::Faction => WizardStep::Faction,
            Self::Race => WizardStep::Race,
            Self::Class => WizardStep::Class,
        }
    }

    /// Fields that must be cleared whenever this one changes
    pub fn downstream(self) -> &'static [SelectionField] {
        self.step().rule().cleared_on_reentry
    }
}

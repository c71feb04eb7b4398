//! The choices made so far in the creation wizard

use serde::{Deserialize, Serialize};

use super::step::SelectionField;
use crate::value_objects::{ClassName, FactionName, RaceName};

/// Partially built faction/race/class triple.
///
/// Only the wizard mutates a selection, so the fields are read-only from the
/// outside and the cascade rules cannot be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    faction: Option<FactionName>,
    race: Option<RaceName>,
    class: Option<ClassName>,
}

impl Selection {
    pub fn faction(&self) -> Option<&FactionName> {
        self.faction.as_ref()
    }

    pub fn race(&self) -> Option<&RaceName> {
        self.race.as_ref()
    }

    pub fn class(&self) -> Option<&ClassName> {
        self.class.as_ref()
    }

    pub fn is_set(&self, field: SelectionField) -> bool {
        match field {
            SelectionField::Faction => self.faction.is_some(),
            SelectionField::Race => self.race.is_some(),
            SelectionField::Class => self.class.is_some(),
        }
    }

    /// The completed triple, if every field is set
    pub fn complete(&self) -> Option<CompletedSelection> {
        Some(CompletedSelection {
            faction: self.faction.clone()?,
            race: self.race.clone()?,
            class: self.class.clone()?,
        })
    }

    pub(crate) fn set_faction(&mut self, faction: FactionName) {
        self.faction = Some(faction);
        self.clear_downstream(SelectionField::Faction);
    }

    pub(crate) fn set_race(&mut self, race: RaceName) {
        self.race = Some(race);
        self.clear_downstream(SelectionField::Race);
    }

    pub(crate) fn set_class(&mut self, class: ClassName) {
        self.class = Some(class);
        self.clear_downstream(SelectionField::Class);
    }

    /// Unset `field` and everything downstream of it
    pub(crate) fn clear(&mut self, field: SelectionField) {
        self.unset(field);
        self.clear_downstream(field);
    }

    fn unset(&mut self, field: SelectionField) {
        match field {
            SelectionField::Faction => self.faction = None,
            SelectionField::Race => self.race = None,
            SelectionField::Class => self.class = None,
        }
    }

    /// Clear every field downstream of `field` (cascading invalidation)
    fn clear_downstream(&mut self, field: SelectionField) {
        for downstream in field.downstream() {
            self.unset(*downstream);
        }
    }
}

/// A selection with every field set, ready to be submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSelection {
    pub faction: FactionName,
    pub race: RaceName,
    pub class: ClassName,
}

//! Step validation and option derivation
//!
//! Everything here is a pure function of the catalog, the current stage and
//! the current selection. Nothing is cached; the presentation layer re-derives
//! after every state change.

use serde::Serialize;

use super::selection::Selection;
use super::step::WizardStep;
use crate::catalog::{Catalog, CharacterClass, Faction, Race};
use crate::value_objects::{ClassName, RaceName};

/// Navigation control state for the active stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepValidation {
    pub step: WizardStep,
    /// The active stage's field is set
    pub can_advance: bool,
    /// There is an earlier stage to go back to
    pub can_retreat: bool,
    /// At the final stage with a complete selection
    pub can_submit: bool,
}

pub fn validate(step: WizardStep, selection: &Selection) -> StepValidation {
    StepValidation {
        step,
        can_advance: selection.is_set(step.field()),
        can_retreat: !step.is_initial(),
        can_submit: step.is_terminal() && selection.complete().is_some(),
    }
}

/// Per-class eligibility predicate for the Class stage.
///
/// Without a race nothing is eligible.
pub fn is_eligible(catalog: &Catalog, race: Option<&RaceName>, class: &ClassName) -> bool {
    race.is_some_and(|race| catalog.is_eligible(race, class))
}

/// Invert the eligibility relation for one class: `{ r : class ∈ eligibility(r) }`.
///
/// Scans every race in catalog order, which is fine at catalog scale.
pub fn available_races(catalog: &Catalog, class: &ClassName) -> Vec<RaceName> {
    catalog
        .races()
        .iter()
        .filter(|race| catalog.is_eligible(race.name(), class))
        .map(|race| race.name().clone())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionOption {
    pub faction: Faction,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceOption {
    pub race: Race,
    pub selected: bool,
}

/// A class as offered at the Class stage.
///
/// Ineligible classes are still listed so the user can see which races
/// would unlock them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOption {
    pub class: CharacterClass,
    pub available: bool,
    pub available_races: Vec<RaceName>,
    pub selected: bool,
}

impl ClassOption {
    /// Hint for an unavailable class, e.g. `"Available to: Andalusian, Mashriqi"`
    pub fn unavailable_hint(&self) -> Option<String> {
        if self.available {
            return None;
        }
        if self.available_races.is_empty() {
            return Some("Not available to any race".to_string());
        }
        let races: Vec<&str> = self.available_races.iter().map(RaceName::as_str).collect();
        Some(format!("Available to: {}", races.join(", ")))
    }
}

/// The option set selectable at one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "options", rename_all = "snake_case")]
pub enum StepOptions {
    Factions(Vec<FactionOption>),
    Races(Vec<RaceOption>),
    Classes(Vec<ClassOption>),
}

impl StepOptions {
    pub fn len(&self) -> usize {
        match self {
            Self::Factions(options) => options.len(),
            Self::Races(options) => options.len(),
            Self::Classes(options) => options.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Options the user may actually pick
    pub fn selectable_count(&self) -> usize {
        match self {
            Self::Classes(options) => options.iter().filter(|o| o.available).count(),
            other => other.len(),
        }
    }
}

/// Compute the options for `step` given the current selection.
pub fn options_for(catalog: &Catalog, step: WizardStep, selection: &Selection) -> StepOptions {
    match step {
        WizardStep::Faction => StepOptions::Factions(
            catalog
                .factions()
                .iter()
                .map(|faction| FactionOption {
                    selected: selection.faction() == Some(faction.name()),
                    faction: faction.clone(),
                })
                .collect(),
        ),
        WizardStep::Race => {
            let races = selection
                .faction()
                .and_then(|faction| catalog.races_of(faction).ok())
                .unwrap_or_default();
            StepOptions::Races(
                races
                    .into_iter()
                    .map(|race| RaceOption {
                        selected: selection.race() == Some(race.name()),
                        race: race.clone(),
                    })
                    .collect(),
            )
        }
        WizardStep::Class => StepOptions::Classes(
            catalog
                .classes()
                .iter()
                .map(|class| ClassOption {
                    available: is_eligible(catalog, selection.race(), class.name()),
                    available_races: available_races(catalog, class.name()),
                    selected: selection.class() == Some(class.name()),
                    class: class.clone(),
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{class, faction, race, small_catalog};

    fn selection(f: Option<&str>, r: Option<&str>, c: Option<&str>) -> Selection {
        let mut selection = Selection::default();
        if let Some(f) = f {
            selection.set_faction(faction(f));
        }
        if let Some(r) = r {
            selection.set_race(race(r));
        }
        if let Some(c) = c {
            selection.set_class(class(c));
        }
        selection
    }

    #[test]
    fn can_advance_tracks_active_field() {
        let empty = selection(None, None, None);
        assert!(!validate(WizardStep::Faction, &empty).can_advance);

        let with_faction = selection(Some("A"), None, None);
        assert!(validate(WizardStep::Faction, &with_faction).can_advance);
        assert!(!validate(WizardStep::Race, &with_faction).can_advance);
    }

    #[test]
    fn can_retreat_everywhere_but_the_first_stage() {
        let empty = selection(None, None, None);
        assert!(!validate(WizardStep::Faction, &empty).can_retreat);
        assert!(validate(WizardStep::Race, &empty).can_retreat);
        assert!(validate(WizardStep::Class, &empty).can_retreat);
    }

    #[test]
    fn can_submit_only_at_class_stage_with_full_selection() {
        let full = selection(Some("A"), Some("A1"), Some("X"));
        assert!(validate(WizardStep::Class, &full).can_submit);
        assert!(!validate(WizardStep::Race, &full).can_submit);

        let partial = selection(Some("A"), Some("A1"), None);
        assert!(!validate(WizardStep::Class, &partial).can_submit);
    }

    #[test]
    fn available_races_inverts_the_relation() {
        let catalog = small_catalog();
        assert_eq!(available_races(&catalog, &class("X")), vec![race("A1"), race("B1")]);
        assert_eq!(available_races(&catalog, &class("Y")), vec![race("A1"), race("A2")]);
    }

    #[test]
    fn is_eligible_without_race_is_false() {
        let catalog = small_catalog();
        assert!(!is_eligible(&catalog, None, &class("X")));
        assert!(is_eligible(&catalog, Some(&race("B1")), &class("X")));
    }

    #[test]
    fn race_options_are_scoped_to_faction() {
        let catalog = small_catalog();
        let options = options_for(&catalog, WizardStep::Race, &selection(Some("B"), None, None));
        match options {
            StepOptions::Races(races) => {
                assert_eq!(races.len(), 1);
                assert_eq!(races[0].race.name(), &race("B1"));
                assert!(!races[0].selected);
            }
            other => panic!("expected races, got {other:?}"),
        }
    }

    #[test]
    fn class_options_annotate_ineligible_classes() {
        let catalog = small_catalog();
        let options = options_for(
            &catalog,
            WizardStep::Class,
            &selection(Some("A"), Some("A2"), None),
        );
        let StepOptions::Classes(classes) = options else {
            panic!("expected classes");
        };

        let x = &classes[0];
        assert_eq!(x.class.name(), &class("X"));
        assert!(!x.available);
        assert_eq!(x.available_races, vec![race("A1"), race("B1")]);
        assert_eq!(x.unavailable_hint().as_deref(), Some("Available to: A1, B1"));

        let y = &classes[1];
        assert!(y.available);
        assert!(y.unavailable_hint().is_none());
    }

    #[test]
    fn class_options_serialize_with_camel_case_keys() {
        let catalog = small_catalog();
        let options = options_for(
            &catalog,
            WizardStep::Class,
            &selection(Some("A"), Some("A2"), None),
        );
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["step"], "classes");
        assert_eq!(json["options"][0]["available"], false);
        assert_eq!(
            json["options"][0]["availableRaces"],
            serde_json::json!(["A1", "B1"])
        );
    }

    #[test]
    fn zero_class_race_offers_nothing_selectable() {
        let catalog = Catalog::builder()
            .faction("A", "", "")
            .race("A", "Lonely", "", &[])
            .class("X", "", "")
            .build()
            .unwrap();
        let mut selection = Selection::default();
        selection.set_faction(faction("A"));
        selection.set_race(race("Lonely"));

        let options = options_for(&catalog, WizardStep::Class, &selection);
        assert_eq!(options.len(), 1);
        assert_eq!(options.selectable_count(), 0);
    }
}

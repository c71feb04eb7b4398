//! Eligibility catalog - static reference data for character creation
//!
//! The catalog holds the factions, each faction's race roster, the global
//! class roster and the race → class eligibility relation. It is immutable
//! once built; every invariant is checked in [`CatalogBuilder::build`] so the
//! rest of the crate can trust lookups against a built catalog.

mod standard;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{ClassName, FactionName, RaceName};

pub use standard::names as standard_names;

/// Top-level allegiance choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    name: FactionName,
    description: String,
    emblem: String,
}

impl Faction {
    pub fn name(&self) -> &FactionName {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Short glyph shown next to the faction name
    pub fn emblem(&self) -> &str {
        &self.emblem
    }
}

/// Ancestry choice, owned by exactly one faction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    name: RaceName,
    faction: FactionName,
    description: String,
    traits: Vec<String>,
}

impl Race {
    pub fn name(&self) -> &RaceName {
        &self.name
    }

    pub fn faction(&self) -> &FactionName {
        &self.faction
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    pub fn belongs_to(&self, faction: &FactionName) -> bool {
        &self.faction == faction
    }
}

/// Role/profession choice, defined globally and gated per race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClass {
    name: ClassName,
    description: String,
    emblem: String,
}

impl CharacterClass {
    pub fn name(&self) -> &ClassName {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn emblem(&self) -> &str {
        &self.emblem
    }
}

/// Immutable creation catalog.
///
/// Lookups with a key outside the catalog fail with `DomainError::NotFound`,
/// which callers should treat as a programming error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    factions: Vec<Faction>,
    races: Vec<Race>,
    classes: Vec<CharacterClass>,
    /// Eligible classes per race, kept in class-roster order
    eligibility: HashMap<RaceName, Vec<ClassName>>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Factions in presentation order
    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    pub fn faction(&self, name: &FactionName) -> Result<&Faction, DomainError> {
        self.factions
            .iter()
            .find(|f| &f.name == name)
            .ok_or_else(|| DomainError::not_found("Faction", name.as_str()))
    }

    /// Every race across all factions, in faction then roster order
    pub fn races(&self) -> &[Race] {
        &self.races
    }

    /// The ordered race roster of one faction
    pub fn races_of(&self, faction: &FactionName) -> Result<Vec<&Race>, DomainError> {
        self.faction(faction)?;
        Ok(self.races.iter().filter(|r| r.belongs_to(faction)).collect())
    }

    pub fn race(&self, name: &RaceName) -> Result<&Race, DomainError> {
        self.races
            .iter()
            .find(|r| &r.name == name)
            .ok_or_else(|| DomainError::not_found("Race", name.as_str()))
    }

    /// The global class roster in presentation order
    pub fn classes(&self) -> &[CharacterClass] {
        &self.classes
    }

    pub fn class(&self, name: &ClassName) -> Result<&CharacterClass, DomainError> {
        self.classes
            .iter()
            .find(|c| &c.name == name)
            .ok_or_else(|| DomainError::not_found("Class", name.as_str()))
    }

    /// Classes a race may take. A race without an entry has none.
    pub fn eligible_classes(&self, race: &RaceName) -> Result<&[ClassName], DomainError> {
        self.race(race)?;
        Ok(self
            .eligibility
            .get(race)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Membership test against the eligibility relation; unknown keys are simply ineligible.
    pub fn is_eligible(&self, race: &RaceName, class: &ClassName) -> bool {
        self.eligibility
            .get(race)
            .is_some_and(|classes| classes.contains(class))
    }
}

/// Accumulates raw catalog entries and validates them all at once.
#[derive(Debug, Default, Clone)]
pub struct CatalogBuilder {
    factions: Vec<(String, String, String)>,
    races: Vec<(String, String, String, Vec<String>)>,
    classes: Vec<(String, String, String)>,
    eligibility: Vec<(String, Vec<String>)>,
}

impl CatalogBuilder {
    pub fn faction(mut self, name: &str, description: &str, emblem: &str) -> Self {
        self.factions
            .push((name.to_string(), description.to_string(), emblem.to_string()));
        self
    }

    pub fn race(mut self, faction: &str, name: &str, description: &str, traits: &[&str]) -> Self {
        self.races.push((
            faction.to_string(),
            name.to_string(),
            description.to_string(),
            traits.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    pub fn class(mut self, name: &str, description: &str, emblem: &str) -> Self {
        self.classes
            .push((name.to_string(), description.to_string(), emblem.to_string()));
        self
    }

    /// Declare the classes a race may take.
    pub fn eligible(mut self, race: &str, classes: &[&str]) -> Self {
        self.eligibility.push((
            race.to_string(),
            classes.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    /// Validate and freeze the catalog.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` for an empty or oversized name
    /// - `DomainError::Constraint` for duplicate names, a race whose faction
    ///   does not exist, or an eligibility entry naming an unknown race or class
    pub fn build(self) -> Result<Catalog, DomainError> {
        let mut factions = Vec::with_capacity(self.factions.len());
        let mut seen_factions = HashSet::new();
        for (name, description, emblem) in self.factions {
            let name = FactionName::new(name)?;
            if !seen_factions.insert(name.clone()) {
                return Err(DomainError::constraint(format!(
                    "Duplicate faction: {}",
                    name
                )));
            }
            factions.push(Faction {
                name,
                description,
                emblem,
            });
        }

        // Race names key the eligibility relation, so they must be unique
        // across the whole catalog, not just within a faction.
        let mut races: Vec<Race> = Vec::with_capacity(self.races.len());
        let mut seen_races = HashSet::new();
        for (faction, name, description, traits) in self.races {
            let faction = FactionName::new(faction)?;
            let name = RaceName::new(name)?;
            if !seen_factions.contains(&faction) {
                return Err(DomainError::constraint(format!(
                    "Race {} belongs to unknown faction {}",
                    name, faction
                )));
            }
            if !seen_races.insert(name.clone()) {
                return Err(DomainError::constraint(format!("Duplicate race: {}", name)));
            }
            races.push(Race {
                name,
                faction,
                description,
                traits,
            });
        }
        // Group rosters by faction order so `races()` reads naturally.
        races.sort_by_key(|race| {
            factions
                .iter()
                .position(|f| f.name == race.faction)
                .unwrap_or(usize::MAX)
        });

        let mut classes = Vec::with_capacity(self.classes.len());
        let mut seen_classes = HashSet::new();
        for (name, description, emblem) in self.classes {
            let name = ClassName::new(name)?;
            if !seen_classes.insert(name.clone()) {
                return Err(DomainError::constraint(format!("Duplicate class: {}", name)));
            }
            classes.push(CharacterClass {
                name,
                description,
                emblem,
            });
        }

        let mut eligibility: HashMap<RaceName, Vec<ClassName>> = HashMap::new();
        for (race, class_names) in self.eligibility {
            let race = RaceName::new(race)?;
            if !seen_races.contains(&race) {
                return Err(DomainError::constraint(format!(
                    "Eligibility references unknown race {}",
                    race
                )));
            }
            if eligibility.contains_key(&race) {
                return Err(DomainError::constraint(format!(
                    "Eligibility declared twice for race {}",
                    race
                )));
            }

            let mut allowed = HashSet::new();
            for class in class_names {
                let class = ClassName::new(class)?;
                if !seen_classes.contains(&class) {
                    return Err(DomainError::constraint(format!(
                        "Eligibility for {} references unknown class {}",
                        race, class
                    )));
                }
                allowed.insert(class);
            }

            let ordered = classes
                .iter()
                .filter(|c| allowed.contains(&c.name))
                .map(|c| c.name.clone())
                .collect();
            eligibility.insert(race, ordered);
        }

        Ok(Catalog {
            factions,
            races,
            classes,
            eligibility,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Two factions, three races, two classes:
    /// A → {A1, A2}, B → {B1}; A1 → {X, Y}, A2 → {Y}, B1 → {X}
    pub fn small_catalog() -> Catalog {
        Catalog::builder()
            .faction("A", "First faction", "a")
            .faction("B", "Second faction", "b")
            .race("A", "A1", "First race of A", &["steady"])
            .race("A", "A2", "Second race of A", &["quick", "clever"])
            .race("B", "B1", "Only race of B", &[])
            .class("X", "Class X", "x")
            .class("Y", "Class Y", "y")
            .eligible("A1", &["X", "Y"])
            .eligible("A2", &["Y"])
            .eligible("B1", &["X"])
            .build()
            .unwrap()
    }

    pub fn faction(name: &str) -> FactionName {
        FactionName::new(name).unwrap()
    }

    pub fn race(name: &str) -> RaceName {
        RaceName::new(name).unwrap()
    }

    pub fn class(name: &str) -> ClassName {
        ClassName::new(name).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn factions_keep_declaration_order() {
        let catalog = small_catalog();
        let names: Vec<_> = catalog.factions().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn races_of_filters_by_faction() {
        let catalog = small_catalog();
        let names: Vec<_> = catalog
            .races_of(&faction("A"))
            .unwrap()
            .iter()
            .map(|r| r.name().as_str())
            .collect();
        assert_eq!(names, vec!["A1", "A2"]);
    }

    #[test]
    fn races_of_unknown_faction_is_not_found() {
        let catalog = small_catalog();
        let err = catalog.races_of(&faction("C")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn eligible_classes_follow_roster_order() {
        let catalog = Catalog::builder()
            .faction("A", "", "")
            .race("A", "A1", "", &[])
            .class("X", "", "")
            .class("Y", "", "")
            .eligible("A1", &["Y", "X", "Y"])
            .build()
            .unwrap();
        let classes = catalog.eligible_classes(&race("A1")).unwrap();
        assert_eq!(classes, &[class("X"), class("Y")]);
    }

    #[test]
    fn race_without_eligibility_has_no_classes() {
        let catalog = Catalog::builder()
            .faction("A", "", "")
            .race("A", "A1", "", &[])
            .class("X", "", "")
            .build()
            .unwrap();
        assert!(catalog.eligible_classes(&race("A1")).unwrap().is_empty());
    }

    #[test]
    fn eligible_classes_for_unknown_race_is_not_found() {
        let catalog = small_catalog();
        assert!(catalog.eligible_classes(&race("Z9")).unwrap_err().is_not_found());
    }

    #[test]
    fn is_eligible_checks_membership() {
        let catalog = small_catalog();
        assert!(catalog.is_eligible(&race("A1"), &class("X")));
        assert!(!catalog.is_eligible(&race("A2"), &class("X")));
        assert!(!catalog.is_eligible(&race("Z9"), &class("X")));
    }

    #[test]
    fn build_rejects_race_of_unknown_faction() {
        let result = Catalog::builder()
            .faction("A", "", "")
            .race("B", "B1", "", &[])
            .build();
        assert!(matches!(result, Err(DomainError::Constraint(_))));
    }

    #[test]
    fn build_rejects_eligibility_with_unknown_class() {
        let result = Catalog::builder()
            .faction("A", "", "")
            .race("A", "A1", "", &[])
            .class("X", "", "")
            .eligible("A1", &["Q"])
            .build();
        let err = result.unwrap_err();
        assert_eq!(
            err,
            DomainError::constraint("Eligibility for A1 references unknown class Q")
        );
    }

    #[test]
    fn build_rejects_duplicate_race_across_factions() {
        let result = Catalog::builder()
            .faction("A", "", "")
            .faction("B", "", "")
            .race("A", "Twin", "", &[])
            .race("B", "Twin", "", &[])
            .build();
        assert!(matches!(result, Err(DomainError::Constraint(_))));
    }

    #[test]
    fn build_rejects_blank_names() {
        let result = Catalog::builder().faction("  ", "", "").build();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn races_are_grouped_by_faction_order() {
        let catalog = Catalog::builder()
            .faction("A", "", "")
            .faction("B", "", "")
            .race("B", "B1", "", &[])
            .race("A", "A1", "", &[])
            .build()
            .unwrap();
        let names: Vec<_> = catalog.races().iter().map(|r| r.name().as_str()).collect();
        assert_eq!(names, vec!["A1", "B1"]);
    }
}

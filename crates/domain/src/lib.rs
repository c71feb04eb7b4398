//! Errant Dreams domain: the character creation catalog and wizard.
//!
//! Pure, synchronous and free of I/O. Submission and persistence live in the
//! player crates.

pub mod catalog;
pub mod creation;
pub mod error;
pub mod value_objects;

pub use catalog::{standard_names, Catalog, CatalogBuilder, CharacterClass, Faction, Race};
pub use creation::{
    ClassOption, CompletedSelection, CreationWizard, FactionOption, RaceOption, Selection,
    SelectionField, StepOptions, StepRule, StepValidation, WizardStep,
};
pub use error::{DomainError, SelectionError};
pub use value_objects::{CharacterName, ClassName, FactionName, RaceName};

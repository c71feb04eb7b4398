//! Character creation - the faction → race → class wizard
//!
//! - [`step`]: the ordered stages and their transition table
//! - [`selection`]: the partially built triple
//! - [`validator`]: pure derivations (navigation flags, per-stage options)
//! - [`wizard`]: the state machine that owns a selection

mod selection;
mod step;
pub mod validator;
mod wizard;

pub use selection::{CompletedSelection, Selection};
pub use step::{SelectionField, StepRule, WizardStep};
pub use validator::{ClassOption, FactionOption, RaceOption, StepOptions, StepValidation};
pub use wizard::CreationWizard;

//! Player port definitions and shared cross-layer types.

pub mod creation_types;
pub mod outbound;

// Re-export creation types at crate root for convenience
pub use creation_types::{CharacterRecord, CreateCharacterRequest, CreateCharacterResponse};

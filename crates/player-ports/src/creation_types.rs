//! Wire types for the character creation API
//!
//! These types are owned by the ports layer and define the contract between
//! the application layer and the HTTP adapter. Field names match the API's
//! JSON exactly.

use serde::{Deserialize, Serialize};

use errant_domain::{CharacterName, CompletedSelection};

/// Body of `POST /api/character/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    pub faction: String,
    pub race: String,
    pub character_class: String,
    pub name: String,
}

impl CreateCharacterRequest {
    pub fn new(selection: &CompletedSelection, name: &CharacterName) -> Self {
        Self {
            faction: selection.faction.to_string(),
            race: selection.race.to_string(),
            character_class: selection.class.to_string(),
            name: name.to_string(),
        }
    }
}

/// Response envelope shared by the creation and lookup endpoints.
///
/// The API sends this shape for failures as well (with `success: false`), so
/// adapters decode it regardless of status code where they can.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCharacterResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterRecord>,
}

impl CreateCharacterResponse {
    pub fn created(message: impl Into<String>, character: CharacterRecord) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            character: Some(character),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            character: None,
        }
    }
}

/// A character as returned by the server.
///
/// Opaque pass-through: the client stores and forwards it without depending on
/// its fields beyond a few display helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRecord(serde_json::Value);

impl CharacterRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }

    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(serde_json::Value::as_i64)
    }
}

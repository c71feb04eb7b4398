//! Session service - the logged-in user's credential and character
//!
//! Wraps the platform storage so the rest of the client never handles raw
//! storage keys.

use std::sync::Arc;

use errant_player_ports::outbound::{storage_keys, Credential, StorageProvider};
use errant_player_ports::CharacterRecord;

/// Credential and active-character cache backed by platform storage
#[derive(Clone)]
pub struct SessionService {
    storage: Arc<dyn StorageProvider>,
}

impl SessionService {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// The stored bearer credential, if the user has logged in
    pub fn credential(&self) -> Option<Credential> {
        self.storage
            .load(storage_keys::TOKEN)
            .and_then(Credential::new)
    }

    pub fn store_credential(&self, credential: &Credential) {
        self.storage.save(storage_keys::TOKEN, credential.expose());
    }

    /// Cache the account's active character
    pub fn remember_character(&self, record: &CharacterRecord) {
        match serde_json::to_string(record) {
            Ok(json) => self.storage.save(storage_keys::CHARACTER, &json),
            Err(e) => tracing::error!("Failed to serialize character record: {}", e),
        }
    }

    /// The cached character, ignoring entries that no longer parse
    pub fn cached_character(&self) -> Option<CharacterRecord> {
        let json = self.storage.load(storage_keys::CHARACTER)?;
        match serde_json::from_str(&json) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Discarding unreadable cached character: {}", e);
                None
            }
        }
    }

    /// Forget both the credential and the cached character
    pub fn clear(&self) {
        self.storage.remove(storage_keys::TOKEN);
        self.storage.remove(storage_keys::CHARACTER);
    }
}

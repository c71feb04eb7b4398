//! Platform port - local key/value storage
//!
//! Storage is best-effort: adapters log failures instead of returning them,
//! since losing a cached value only costs the user a fresh login.

/// Storage keys used across the player client
pub mod storage_keys {
    /// Bearer credential issued at login
    pub const TOKEN: &str = "token";
    /// JSON of the account's active character
    pub const CHARACTER: &str = "character";
}

/// Persistent string key/value store
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait StorageProvider: Send + Sync {
    fn save(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

//! Validated name newtypes for catalog entries and characters
//!
//! Catalog identifiers get one newtype per kind so a race name can never be
//! handed to something expecting a class name. All names are:
//! - Non-empty
//! - Trimmed of leading/trailing whitespace
//! - Within length limits

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for catalog names (matches the API's choice column width)
const MAX_CATALOG_NAME_LENGTH: usize = 50;

/// Maximum length for character names
const MAX_CHARACTER_NAME_LENGTH: usize = 255;

macro_rules! define_catalog_name {
    ($name:ident, $label:literal) => {
        #[doc = concat!("A validated ", $label, " name (non-empty, <=50 chars, trimmed)")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!(
                        $label,
                        " name cannot be empty"
                    )));
                }
                if trimmed.len() > MAX_CATALOG_NAME_LENGTH {
                    return Err(DomainError::validation(format!(
                        "{} name cannot exceed {} characters",
                        $label, MAX_CATALOG_NAME_LENGTH
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = DomainError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_catalog_name!(FactionName, "Faction");
define_catalog_name!(RaceName, "Race");
define_catalog_name!(ClassName, "Class");

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (non-empty, <=255 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 255 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_CHARACTER_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Character name cannot exceed {} characters",
                MAX_CHARACTER_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The default display name for a fresh character: `"<race> <class>"`.
    pub fn derived(race: &RaceName, class: &ClassName) -> Self {
        // Both parts are validated non-empty, so the result always is too.
        Self(format!("{} {}", race, class))
    }

    /// Resolve an optional user-supplied override against the derived default.
    ///
    /// A missing or blank override falls back to [`CharacterName::derived`].
    pub fn resolve(
        override_name: Option<&str>,
        race: &RaceName,
        class: &ClassName,
    ) -> Result<Self, DomainError> {
        match override_name {
            Some(name) if !name.trim().is_empty() => Self::new(name),
            _ => Ok(Self::derived(race, class)),
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

//! Character API Port - Outbound port for the character endpoints
//!
//! Abstracts the HTTP calls the creation flow makes so application services
//! can be tested without a server.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::creation_types::{CharacterRecord, CreateCharacterRequest, CreateCharacterResponse};

/// Errors from creation API operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server rejected the credential (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success status whose body could not be interpreted
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The request never produced a response (connection, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Opaque bearer credential issued by the auth service.
///
/// Forwarded unmodified; `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a stored token. Blank tokens are treated as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Port for the character endpoints of the game API
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CharacterApiPort: Send + Sync {
    /// Create a character for the credential's account.
    ///
    /// An application-level rejection comes back as `Ok` with
    /// `success == false`; only transport and authentication failures are
    /// errors.
    async fn create_character(
        &self,
        credential: &Credential,
        request: &CreateCharacterRequest,
    ) -> Result<CreateCharacterResponse, ApiError>;

    /// The account's active character, or `None` if it has none
    async fn active_character(
        &self,
        credential: &Credential,
    ) -> Result<Option<CharacterRecord>, ApiError>;
}

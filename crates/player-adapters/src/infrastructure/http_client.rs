//! HTTP client for the character endpoints of the game API
//!
//! Implements `CharacterApiPort` with reqwest. The API wraps failures in the
//! same `{success, message}` envelope as successes, so bodies are decoded
//! whatever the status code.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use errant_player_ports::outbound::{ApiError, CharacterApiPort, Credential};
use errant_player_ports::{CharacterRecord, CreateCharacterRequest, CreateCharacterResponse};

use super::config::ClientConfig;

const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "Invalid or expired authentication token.";

/// reqwest-backed `CharacterApiPort`
#[derive(Clone)]
pub struct HttpCharacterApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCharacterApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.backend_url, config.request_timeout)
    }

    fn create_url(&self) -> String {
        format!("{}/api/character/create", self.base_url)
    }

    fn character_url(&self) -> String {
        format!("{}/api/character", self.base_url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::RequestFailed(format!(
                "No response within {} ms",
                self.timeout.as_millis()
            ))
        } else {
            ApiError::RequestFailed(e.to_string())
        }
    }

    /// Status and body text of a response
    async fn read(&self, response: reqwest::Response) -> Result<(StatusCode, String), ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        Ok((status, body))
    }
}

/// The `message` field of an error envelope, if the body is one
fn envelope_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn unauthorized(body: &str) -> ApiError {
    ApiError::Unauthorized(
        envelope_message(body).unwrap_or_else(|| DEFAULT_UNAUTHORIZED_MESSAGE.to_string()),
    )
}

fn http_error(status: StatusCode, body: &str) -> ApiError {
    let message = envelope_message(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        }
    });
    ApiError::HttpError {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl CharacterApiPort for HttpCharacterApi {
    async fn create_character(
        &self,
        credential: &Credential,
        request: &CreateCharacterRequest,
    ) -> Result<CreateCharacterResponse, ApiError> {
        tracing::debug!(url = %self.create_url(), "POST character create");
        let response = self
            .client
            .post(self.create_url())
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let (status, body) = self.read(response).await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(unauthorized(&body));
        }

        match serde_json::from_str::<CreateCharacterResponse>(&body) {
            Ok(envelope) if status.is_success() => Ok(envelope),
            // Application-level rejection (validation, one character per account)
            Ok(envelope) if !envelope.success => {
                tracing::debug!(status = status.as_u16(), "Creation rejected by server");
                Ok(envelope)
            }
            Ok(_) => Err(http_error(status, &body)),
            Err(e) if status.is_success() => Err(ApiError::ParseError(e.to_string())),
            Err(_) => Err(http_error(status, &body)),
        }
    }

    async fn active_character(
        &self,
        credential: &Credential,
    ) -> Result<Option<CharacterRecord>, ApiError> {
        tracing::debug!(url = %self.character_url(), "GET active character");
        let response = self
            .client
            .get(self.character_url())
            .bearer_auth(credential.expose())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let (status, body) = self.read(response).await?;

        match status {
            StatusCode::UNAUTHORIZED => return Err(unauthorized(&body)),
            StatusCode::NOT_FOUND => return Ok(None),
            s if !s.is_success() => return Err(http_error(s, &body)),
            _ => {}
        }

        let envelope: CreateCharacterResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::ParseError(e.to_string()))?;
        if envelope.success {
            Ok(envelope.character)
        } else {
            Ok(None)
        }
    }
}

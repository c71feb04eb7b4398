//! Client configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use super::storage::FileStorageProvider;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Player client configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Game API base URL, without trailing slash
    pub backend_url: String,
    /// Transport timeout for every API request
    pub request_timeout: Duration,
    /// File backing the session store
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend_url = lookup("ERRANT_BACKEND_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let request_timeout_ms = match lookup("ERRANT_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| {
                    format!("ERRANT_REQUEST_TIMEOUT_MS must be a number of milliseconds, got {raw:?}")
                })?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        if request_timeout_ms == 0 {
            anyhow::bail!("ERRANT_REQUEST_TIMEOUT_MS must be greater than zero");
        }

        let session_file = lookup("ERRANT_SESSION_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(FileStorageProvider::default_path);

        Ok(Self {
            backend_url: backend_url.trim().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(request_timeout_ms),
            session_file,
        })
    }
}

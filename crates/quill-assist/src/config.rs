//! Assistant configuration
//!
//! Read from the environment:
//!
//! | Variable             | Meaning                                  |
//! |----------------------|------------------------------------------|
//! | `GEMINI_API_KEY`     | API key (falls back to `API_KEY`)        |
//! | `QUILL_MODEL`        | model name, default `gemini-2.5-flash`   |
//! | `QUILL_AI_ENDPOINT`  | service base URL                         |
//! | `QUILL_AI_TIMEOUT`   | request timeout in seconds, default none |

use std::fmt;
use std::time::Duration;

use crate::error::{AssistError, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, PartialEq, Eq)]
pub struct AssistConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// `None` leaves the timeout to the HTTP client
    pub timeout: Option<Duration>,
}

impl AssistConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var("GEMINI_API_KEY")
            .or_else(|| var("API_KEY"))
            .ok_or(AssistError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(model) = var("QUILL_MODEL") {
            config.model = model;
        }
        if let Some(endpoint) = var("QUILL_AI_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(secs) = var("QUILL_AI_TIMEOUT") {
            let secs: u64 = secs.trim().parse().map_err(|_| AssistError::InvalidSetting {
                name: "QUILL_AI_TIMEOUT",
                value: secs.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full `generateContent` URL for the configured model
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

// Keeps the key out of logs
impl fmt::Debug for AssistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

//! Transport to the remote text-generation service
//!
//! [`Transport`] is the seam between the assistant and the network: one
//! prompt in, the model's text out. [`GeminiTransport`] speaks the
//! `generateContent` REST API.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AssistConfig;
use crate::error::{AssistError, Result};

/// One request/response round trip to a text-generation model
pub trait Transport: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Best-effort message from an error response body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// HTTP transport for the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiTransport {
    client: reqwest::Client,
    config: AssistConfig,
}

impl GeminiTransport {
    pub fn new(config: AssistConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }
}

impl Transport for GeminiTransport {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Sending generateContent");

        let response = self
            .client
            .post(self.config.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.text().ok_or(AssistError::EmptyResponse)
    }
}

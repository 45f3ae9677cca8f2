//! The assistant client
//!
//! [`Assistant`] never fails past its own boundary: transport errors are
//! logged and turned into a readable message, so the caller always gets text
//! to show in the console.

use quill_core::state::{Action, AssistKind, AssistRequest};
use tracing::{error, info};

use crate::config::AssistConfig;
use crate::error::Result;
use crate::prompt;
use crate::transport::{GeminiTransport, Transport};

/// Prefix of the text returned when the remote call fails
pub const FAILURE_PREFIX: &str = "An error occurred while communicating with the AI service: ";

#[derive(Debug, Clone)]
pub struct Assistant<T = GeminiTransport> {
    transport: T,
}

impl Assistant<GeminiTransport> {
    /// Gemini-backed assistant configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::gemini(AssistConfig::from_env()?)
    }

    pub fn gemini(config: AssistConfig) -> Result<Self> {
        info!(model = %config.model, "Assistant configured");
        Ok(Self::new(GeminiTransport::new(config)?))
    }
}

impl<T: Transport> Assistant<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Explanation, improvement suggestions and likely bugs for `code`
    pub async fn explain(&self, code: &str) -> String {
        self.ask(AssistKind::Explain, code).await
    }

    /// A unit test suite for `code`
    pub async fn generate_tests(&self, code: &str) -> String {
        self.ask(AssistKind::GenerateTests, code).await
    }

    pub async fn ask(&self, kind: AssistKind, code: &str) -> String {
        match self.transport.generate(&prompt::for_kind(kind, code)).await {
            Ok(text) => text,
            Err(e) => {
                error!(?kind, "Assistant request failed: {e}");
                format!("{FAILURE_PREFIX}{e}")
            }
        }
    }

    /// Carry out a request from the state and build the action that settles it
    pub async fn handle(&self, request: AssistRequest) -> Action {
        let text = self.ask(request.kind, &request.code).await;
        Action::AssistFinished {
            kind: request.kind,
            outcome: Ok(text),
        }
    }
}

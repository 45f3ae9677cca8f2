//! Error types for the assistant client

use thiserror::Error;

/// Result type for assistant operations
pub type Result<T> = std::result::Result<T, AssistError>;

#[derive(Error, Debug)]
pub enum AssistError {
    /// Neither `GEMINI_API_KEY` nor `API_KEY` is set
    #[error("API key not set (expected GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    #[error("invalid value for {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    /// Connection, timeout or body decoding failure
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response carried no candidate text
    #[error("the model returned an empty response")]
    EmptyResponse,
}

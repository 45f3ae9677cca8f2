//! # Quill Assist
//!
//! Client for the code assistant behind Quill's "Ask AI" and "Generate
//! Tests" actions. Each operation is one round trip to a remote model with a
//! fixed prompt around the user's code.
//!
//! ```rust,no_run
//! # async fn demo() -> quill_assist::Result<()> {
//! use quill_assist::Assistant;
//!
//! let assistant = Assistant::from_env()?;
//! let report = assistant.explain("const sum = (a, b) => a + b;").await;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod prompt;
pub mod transport;

mod error;

pub use client::{Assistant, FAILURE_PREFIX};
pub use config::AssistConfig;
pub use error::{AssistError, Result};
pub use transport::{GeminiTransport, Transport};

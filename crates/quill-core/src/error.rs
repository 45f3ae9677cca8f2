//! Error types for Quill

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using Quill's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Quill operations
///
/// Lookup misses (unknown file ids, a project without `index.html`) are not
/// errors: they produce `None`, an unchanged tree or the not-found document.
#[derive(Error, Debug)]
pub enum Error {
    /// Two nodes in one tree share an id
    #[error("Duplicate file id: {0}")]
    DuplicateId(String),

    /// A node violates the file/folder shape rules
    #[error("Invalid node {id}: {reason}")]
    InvalidNode { id: String, reason: &'static str },

    /// Reading or writing a project on disk failed
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sandbox payload could not be decoded
    #[error("Malformed sandbox message: {0}")]
    MalformedMessage(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

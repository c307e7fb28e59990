//! Record source error types.

use thiserror::Error;

use autonomo_shared::AppError;

/// Errors raised by a [`RecordSource`](super::RecordSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// A record with the same key already exists in the workspace.
    #[error("Record already exists: {0}")]
    Conflict(String),

    /// The backing store could not be read.
    #[error("Record source unavailable: {0}")]
    Unavailable(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Conflict(key) => Self::Conflict(key),
            SourceError::Unavailable(msg) => Self::Source(msg),
        }
    }
}

//! Summary error types.

use thiserror::Error;

use autonomo_shared::AppError;

use crate::source::SourceError;

/// Errors that can occur while computing summaries.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The record source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<SummaryError> for AppError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::Source(e) => e.into(),
        }
    }
}

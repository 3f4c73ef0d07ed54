//! Error types for FAQ corpus loading

use crate::error::AppError;
use std::path::PathBuf;

/// Result type for corpus operations
pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

/// Errors that can occur while loading the FAQ corpus.
///
/// These never abort startup: the service logs them and serves an empty index.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// Corpus file does not exist
    #[error("Corpus not found at {0}")]
    NotFound(PathBuf),

    /// Corpus file exists but could not be read
    #[error("Failed to read corpus {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus is not valid JSON
    #[error("Malformed corpus JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Corpus JSON lacks the top-level `faqs` array
    #[error("Corpus document has no \"faqs\" array")]
    MissingFaqs,

    /// Index was built from in-memory records and has nothing to reload from
    #[error("No corpus source configured")]
    NoSource,
}

impl From<CorpusError> for AppError {
    fn from(err: CorpusError) -> Self {
        match err {
            CorpusError::NoSource => AppError::Validation(err.to_string()),
            other => AppError::Corpus(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_app_error() {
        let err: AppError = CorpusError::NoSource.into();
        assert!(matches!(err, AppError::Validation(_)));

        let err: AppError = CorpusError::MissingFaqs.into();
        assert!(matches!(err, AppError::Corpus(_)));
    }
}

//! Client port for dictionary word searches.

use crate::dictionary::domain::ResultList;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dictionary client operations.
pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Word search contract.
#[async_trait]
pub trait DictionaryClient: Send + Sync {
    /// Searches the dictionary for `query`, returning results in relevance
    /// order. An empty list is a successful search with no matches.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::BadStatus`] when the remote service does
    /// not report success.
    async fn search(&self, query: &str) -> DictionaryResult<ResultList>;
}

/// Errors returned by dictionary clients.
#[derive(Debug, Clone, Error)]
pub enum DictionaryError {
    /// The service answered with a non-success status.
    #[error("bad response status - expected 200 OK, got {0} instead")]
    BadStatus(u16),

    /// The request could not be sent or the response could not be read.
    #[error("dictionary request failed: {0}")]
    Request(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body did not match the expected shape.
    #[error("failed to decode dictionary response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl DictionaryError {
    /// Wraps a transport-level request error.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Arc::new(err))
    }

    /// Wraps a response decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}

//! In-memory dictionary adapter for tests and offline runs.

use crate::dictionary::{
    domain::{DictionaryEntry, ResultList},
    ports::{DictionaryClient, DictionaryError, DictionaryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Canned dictionary keyed by exact query text.
///
/// Unknown queries return an empty result list. A query can be configured
/// to fail with a status code to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDictionary {
    state: Arc<RwLock<InMemoryDictionaryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDictionaryState {
    results: HashMap<String, ResultList>,
    failures: HashMap<String, u16>,
}

impl InMemoryDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the results returned for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Request`] when lock acquisition fails.
    pub fn set_results(
        &self,
        query: impl Into<String>,
        entries: Vec<DictionaryEntry>,
    ) -> DictionaryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DictionaryError::request(std::io::Error::other(err.to_string())))?;
        state.results.insert(query.into(), entries.into());
        Ok(())
    }

    /// Makes searches for `query` fail with the given status code.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Request`] when lock acquisition fails.
    pub fn set_failure(&self, query: impl Into<String>, status: u16) -> DictionaryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DictionaryError::request(std::io::Error::other(err.to_string())))?;
        state.failures.insert(query.into(), status);
        Ok(())
    }
}

#[async_trait]
impl DictionaryClient for InMemoryDictionary {
    async fn search(&self, query: &str) -> DictionaryResult<ResultList> {
        let state = self
            .state
            .read()
            .map_err(|err| DictionaryError::request(std::io::Error::other(err.to_string())))?;
        if let Some(status) = state.failures.get(query) {
            return Err(DictionaryError::BadStatus(*status));
        }
        Ok(state
            .results
            .get(query)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::<DictionaryEntry>::new())))
    }
}

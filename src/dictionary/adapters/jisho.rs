//! HTTP adapter for the jisho.org word search API.

use crate::config::JishoClientConfig;
use crate::dictionary::{
    domain::{DictionaryEntry, ResultList},
    ports::{DictionaryClient, DictionaryError, DictionaryResult},
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Status reported by the API in `meta.status` for a successful search.
const STATUS_OK: u16 = 200;

#[derive(Debug, Deserialize)]
struct SearchMeta {
    status: u16,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    meta: SearchMeta,
    #[serde(default)]
    data: Vec<DictionaryEntry>,
}

/// Dictionary client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct JishoClient {
    http: reqwest::Client,
    config: JishoClientConfig,
}

impl JishoClient {
    /// Creates a client with a fresh connection pool.
    #[must_use]
    pub fn new(config: JishoClientConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Creates a client that shares an existing connection pool.
    #[must_use]
    pub const fn with_http_client(http: reqwest::Client, config: JishoClientConfig) -> Self {
        Self { http, config }
    }
}

/// Decodes a search response body.
///
/// # Errors
///
/// Returns [`DictionaryError::Decode`] for malformed JSON and
/// [`DictionaryError::BadStatus`] when `meta.status` is not 200.
pub fn parse_search_response(body: &str) -> DictionaryResult<ResultList> {
    let envelope: SearchEnvelope = serde_json::from_str(body).map_err(DictionaryError::decode)?;
    into_results(envelope)
}

fn into_results(envelope: SearchEnvelope) -> DictionaryResult<ResultList> {
    if envelope.meta.status != STATUS_OK {
        return Err(DictionaryError::BadStatus(envelope.meta.status));
    }
    Ok(envelope.data.into())
}

#[async_trait]
impl DictionaryClient for JishoClient {
    async fn search(&self, query: &str) -> DictionaryResult<ResultList> {
        let response = self
            .http
            .get(self.config.search_url.as_str())
            .query(&[("keyword", query)])
            .send()
            .await
            .map_err(DictionaryError::request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::BadStatus(status.as_u16()));
        }

        let envelope: SearchEnvelope = response.json().await.map_err(DictionaryError::decode)?;
        let results = into_results(envelope)?;
        debug!(query, results = results.len(), "dictionary search completed");
        Ok(results)
    }
}

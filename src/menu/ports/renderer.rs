//! Rendering port: turns search results into display payloads.

use crate::dictionary::domain::DictionaryEntry;
use crate::menu::domain::DisplayPayload;
use std::sync::Arc;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Pure functions from result data to message content.
pub trait MenuRenderer: Send + Sync {
    /// Renders the search page starting at `offset`. An empty result list
    /// renders the "no results" page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when the page cannot be rendered.
    fn render_search(
        &self,
        query: &str,
        results: &[DictionaryEntry],
        offset: usize,
    ) -> RenderResult<DisplayPayload>;

    /// Renders the detail view of the result at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::IndexOutOfRange`] when `index` is not in
    /// `[0, results.len())`.
    fn render_detail(
        &self,
        query: &str,
        results: &[DictionaryEntry],
        index: usize,
    ) -> RenderResult<DisplayPayload>;

    /// Renders an error notice.
    fn render_error(&self, message: &str) -> DisplayPayload;

    /// Renders an informational notice.
    fn render_notice(&self, title: &str, message: &str) -> DisplayPayload;
}

/// Errors returned by renderers.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The requested result does not exist.
    #[error("result index {index} is out of range for {len} results")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of results available.
        len: usize,
    },

    /// A template failed to render.
    #[error("template rendering failed: {0}")]
    Template(Arc<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Wraps a template engine error.
    pub fn template(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Template(Arc::new(err))
    }
}

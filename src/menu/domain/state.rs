//! Interaction state kept for every live menu message.

use super::{MessageHandle, UserId};
use crate::dictionary::domain::ResultList;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cleanup run when a menu's state is evicted from the cache.
///
/// Implementations release whatever the menu left visible on the message,
/// typically its reactions. Failures are the implementation's to absorb:
/// eviction carries on regardless.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Evictable: Send + Sync {
    /// Releases side effects tied to `message`.
    async fn cleanup(&self, message: &MessageHandle);
}

/// Search context behind a results or detail menu.
pub struct QueryInteractionState {
    query: String,
    response: ResultList,
    offset: AtomicUsize,
}

impl QueryInteractionState {
    /// Creates search context positioned at `offset`.
    #[must_use]
    pub fn new(query: impl Into<String>, response: ResultList, offset: usize) -> Self {
        Self {
            query: query.into(),
            response,
            offset: AtomicUsize::new(offset),
        }
    }

    /// Returns the original search text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the stored results.
    #[must_use]
    pub const fn response(&self) -> &ResultList {
        &self.response
    }

    /// Returns the offset of the page last shown.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset.load(Ordering::Acquire)
    }

    /// Records the offset of the page now shown.
    pub fn set_offset(&self, offset: usize) {
        self.offset.store(offset, Ordering::Release);
    }
}

impl fmt::Debug for QueryInteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryInteractionState")
            .field("query", &self.query)
            .field("results", &self.response.len())
            .field("offset", &self.offset())
            .finish()
    }
}

/// State of one bot-authored message awaiting reactions.
pub struct InteractionState {
    author: UserId,
    message: MessageHandle,
    cleanup: Arc<dyn Evictable>,
    query: Option<QueryInteractionState>,
}

impl InteractionState {
    /// Creates state for a message that only its `author` may drive.
    #[must_use]
    pub fn new(author: UserId, message: MessageHandle, cleanup: Arc<dyn Evictable>) -> Self {
        Self {
            author,
            message,
            cleanup,
            query: None,
        }
    }

    /// Attaches search context.
    #[must_use]
    pub fn with_query(mut self, query: QueryInteractionState) -> Self {
        self.query = Some(query);
        self
    }

    /// Returns the user allowed to react.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the message this state belongs to.
    #[must_use]
    pub const fn message(&self) -> MessageHandle {
        self.message
    }

    /// Returns the search context, if the menu shows search results.
    #[must_use]
    pub const fn query(&self) -> Option<&QueryInteractionState> {
        self.query.as_ref()
    }

    /// Runs the eviction cleanup for this state's message.
    pub async fn evict(&self) {
        self.cleanup.cleanup(&self.message).await;
    }
}

impl fmt::Debug for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionState")
            .field("author", &self.author)
            .field("message", &self.message)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

//! Bounded least-recently-used store of live menu states.
//!
//! Entries are keyed by message handle. Looking a state up promotes it to
//! most recently used, so under pressure the cache drops the menus least
//! likely to still be receiving reactions. Evicted states have their
//! cleanup awaited outside the internal lock; removal never runs cleanup.

use crate::menu::domain::{InteractionState, MessageHandle};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

/// Shared handle to a cached interaction state.
pub type SharedInteractionState = Arc<InteractionState>;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors returned by [`MessageStateCache`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    /// No state is cached for the message. This is an expected outcome once
    /// a menu has been evicted or closed.
    #[error("message {0} not found in cache")]
    NotFound(MessageHandle),

    /// A thread panicked while holding the cache lock.
    #[error("message cache lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Capacity-bounded LRU cache of interaction states.
#[derive(Debug)]
pub struct MessageStateCache {
    capacity: NonZeroUsize,
    entries: Mutex<LruCache<MessageHandle, SharedInteractionState>>,
}

impl MessageStateCache {
    /// Creates an empty cache holding at most `capacity` states.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(LruCache::unbounded()),
        }
    }

    /// Returns the maximum number of states held.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the number of states currently held.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::LockPoisoned`] when the lock is poisoned.
    pub fn len(&self) -> CacheResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns `true` when no states are held.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::LockPoisoned`] when the lock is poisoned.
    pub fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Returns `true` when a state is cached for `message`, without
    /// promoting it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::LockPoisoned`] when the lock is poisoned.
    pub fn contains(&self, message: MessageHandle) -> CacheResult<bool> {
        Ok(self.lock()?.contains(&message))
    }

    /// Returns cached message handles from most to least recently used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::LockPoisoned`] when the lock is poisoned.
    pub fn handles(&self) -> CacheResult<Vec<MessageHandle>> {
        Ok(self.lock()?.iter().map(|(message, _)| *message).collect())
    }

    /// Inserts `state` as the most recently used entry, then evicts least
    /// recently used entries until the cache is back within capacity.
    ///
    /// Each evicted state's cleanup is awaited before the next eviction.
    /// A state already cached for the same message is replaced without
    /// cleanup, since its message is still live.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::LockPoisoned`] when the lock is poisoned.
    pub async fn insert(&self, state: InteractionState) -> CacheResult<SharedInteractionState> {
        let shared = Arc::new(state);
        let message = shared.message();
        {
            let mut entries = self.lock()?;
            if entries.put(message, Arc::clone(&shared)).is_some() {
                debug!(%message, "replaced cached menu state for the same message");
            } else {
                debug!(%message, size = entries.len(), "cached menu state");
            }
        }

        while let Some(evicted) = self.pop_overflow()? {
            info!(message = %evicted.message(), "evicting least recently used menu state");
            evicted.evict().await;
        }
        Ok(shared)
    }

    /// Returns the state cached for `message` and promotes it to most
    /// recently used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] when nothing is cached for the
    /// message, or [`CacheError::LockPoisoned`].
    pub fn lookup(&self, message: MessageHandle) -> CacheResult<SharedInteractionState> {
        let mut entries = self.lock()?;
        entries
            .get(&message)
            .cloned()
            .ok_or(CacheError::NotFound(message))
    }

    /// Removes and returns the state cached for `message` without running
    /// its cleanup.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] when nothing is cached for the
    /// message, or [`CacheError::LockPoisoned`].
    pub fn remove(&self, message: MessageHandle) -> CacheResult<SharedInteractionState> {
        let mut entries = self.lock()?;
        let removed = entries.pop(&message).ok_or(CacheError::NotFound(message))?;
        debug!(%message, size = entries.len(), "removed menu state");
        Ok(removed)
    }

    /// Unlinks the least recently used entry if the cache is over capacity.
    fn pop_overflow(&self) -> CacheResult<Option<SharedInteractionState>> {
        let mut entries = self.lock()?;
        if entries.len() <= self.capacity.get() {
            return Ok(None);
        }
        Ok(entries.pop_lru().map(|(_, state)| state))
    }

    fn lock(&self) -> CacheResult<MutexGuard<'_, LruCache<MessageHandle, SharedInteractionState>>> {
        self.entries
            .lock()
            .map_err(|err| CacheError::LockPoisoned(err.to_string()))
    }
}

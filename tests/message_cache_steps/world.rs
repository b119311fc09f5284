//! Shared world state for message cache BDD scenarios.

use async_trait::async_trait;
use jisho_bot::menu::{
    domain::{ChannelId, Evictable, InteractionState, MessageHandle, UserId},
    services::{CacheError, MessageStateCache},
};
use rstest::fixture;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// Cleanup that records the messages it was asked to clean up.
#[derive(Default)]
pub struct RecordingCleanup {
    cleaned: Mutex<Vec<MessageHandle>>,
}

impl RecordingCleanup {
    /// Returns every cleaned-up message in order.
    pub fn cleaned(&self) -> Vec<MessageHandle> {
        self.cleaned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Evictable for RecordingCleanup {
    async fn cleanup(&self, message: &MessageHandle) {
        self.cleaned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*message);
    }
}

/// Scenario world for message cache behaviour tests.
pub struct CacheWorld {
    pub cache: Option<MessageStateCache>,
    pub cleanup: Arc<RecordingCleanup>,
    pub last_access: Option<Result<(), CacheError>>,
}

impl CacheWorld {
    /// Creates a world with no cache configured yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: None,
            cleanup: Arc::new(RecordingCleanup::default()),
            last_access: None,
        }
    }

    /// Returns the configured cache.
    ///
    /// # Errors
    ///
    /// Returns an error if no cache has been configured.
    pub fn cache(&self) -> Result<&MessageStateCache, eyre::Report> {
        self.cache
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing cache in scenario world"))
    }

    /// Builds interaction state for menu `id` sharing the world's cleanup.
    #[must_use]
    pub fn state(&self, id: u64) -> InteractionState {
        let cleanup: Arc<dyn Evictable> = self.cleanup.clone();
        InteractionState::new(UserId::new(1), menu(id), cleanup)
    }

    /// Replaces the cache with an empty one of `capacity`.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero.
    pub fn configure(&mut self, capacity: usize) -> Result<(), eyre::Report> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or_else(|| eyre::eyre!("capacity must be positive"))?;
        self.cache = Some(MessageStateCache::new(capacity));
        Ok(())
    }
}

impl Default for CacheWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the handle of menu `id`.
#[must_use]
pub const fn menu(id: u64) -> MessageHandle {
    MessageHandle::new(ChannelId::new(1), id)
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CacheWorld {
    CacheWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Chat transport port: posting, editing and reacting to messages.

use crate::menu::domain::{ChannelId, DisplayPayload, MessageHandle, ReactionEvent, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Message primitives the menus are built from.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Posts a new message and returns its handle.
    async fn send(
        &self,
        channel_id: ChannelId,
        payload: &DisplayPayload,
    ) -> TransportResult<MessageHandle>;

    /// Replaces a message's content.
    async fn edit(&self, message: MessageHandle, payload: &DisplayPayload) -> TransportResult<()>;

    /// Deletes a message.
    async fn delete(&self, message: MessageHandle) -> TransportResult<()>;

    /// Adds the bot's own reaction to a message.
    async fn add_reaction(&self, message: MessageHandle, emoji: &str) -> TransportResult<()>;

    /// Removes every reaction from a message.
    async fn clear_reactions(&self, message: MessageHandle) -> TransportResult<()>;

    /// Removes the bot's own reaction from a message. Unlike the other
    /// removal operations this needs no moderation permission.
    async fn remove_own_reaction(&self, message: MessageHandle, emoji: &str) -> TransportResult<()>;

    /// Removes one user's reaction from a message.
    async fn remove_reaction(
        &self,
        message: MessageHandle,
        emoji: &str,
        user: UserId,
    ) -> TransportResult<()>;

    /// Waits for the next reaction added to `message`.
    ///
    /// Implementations must be cancellation safe: dropping the future before
    /// it resolves must not lose an event.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MessageNotFound`] once the message is gone.
    async fn next_reaction(&self, message: MessageHandle) -> TransportResult<ReactionEvent>;
}

/// Errors returned by transport adapters.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The message no longer exists.
    #[error("message {0} not found")]
    MessageNotFound(MessageHandle),

    /// The bot lacks permission for the operation.
    #[error("missing permission to modify message {0}")]
    Forbidden(MessageHandle),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps an adapter-specific failure.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }

    /// Returns `true` when the message was deleted out from under the menu.
    #[must_use]
    pub const fn is_vanished(&self) -> bool {
        matches!(self, Self::MessageNotFound(_))
    }
}

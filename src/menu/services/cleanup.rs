//! Eviction cleanup backed by the chat transport.

use crate::menu::{
    domain::{CONTROL_EMOJIS, Evictable, MessageHandle},
    ports::{MessageTransport, TransportError, TransportResult},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Takes the bot's own `emojis` off `message` one at a time. Used when the
/// bot may not clear every reaction at once.
///
/// Stops quietly if even that is forbidden. Other failures on a single
/// emoji are logged and skipped.
///
/// # Errors
///
/// Returns [`TransportError::MessageNotFound`] once the message is gone.
pub(crate) async fn remove_own_controls<T, I>(
    transport: &T,
    message: MessageHandle,
    emojis: I,
) -> TransportResult<()>
where
    T: MessageTransport + ?Sized,
    I: IntoIterator<Item = &'static str>,
{
    for emoji in emojis {
        match transport.remove_own_reaction(message, emoji).await {
            Ok(()) => {}
            Err(TransportError::Forbidden(_)) => {
                debug!(%message, "cannot remove own reactions either");
                return Ok(());
            }
            Err(err) if err.is_vanished() => return Err(err),
            Err(err) => warn!(%message, emoji, error = %err, "failed to remove own reaction"),
        }
    }
    Ok(())
}

/// Clears a menu's reactions when its state is evicted, so users stop
/// pressing controls nothing listens to any more. Without permission to
/// clear, the bot removes its own controls instead.
pub struct ReactionCleanup<T>
where
    T: MessageTransport,
{
    transport: Arc<T>,
}

impl<T> ReactionCleanup<T>
where
    T: MessageTransport,
{
    /// Creates a cleanup that clears reactions through `transport`.
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T> Evictable for ReactionCleanup<T>
where
    T: MessageTransport,
{
    async fn cleanup(&self, message: &MessageHandle) {
        let result = match self.transport.clear_reactions(*message).await {
            Err(TransportError::Forbidden(_)) => {
                remove_own_controls(self.transport.as_ref(), *message, CONTROL_EMOJIS).await
            }
            other => other,
        };
        if let Err(err) = result
            && !err.is_vanished()
        {
            warn!(%message, error = %err, "failed to clear reactions on evicted menu");
        }
    }
}

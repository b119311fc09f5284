//! In-memory chat transport.

use crate::menu::{
    domain::{ChannelId, DisplayPayload, MessageHandle, ReactionEvent, UserId},
    ports::{MessageTransport, TransportError, TransportResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, mpsc};

/// A side effect performed through the transport, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOperation {
    /// A message was posted.
    Send {
        /// New message.
        message: MessageHandle,
        /// Posted content.
        payload: DisplayPayload,
    },
    /// A message was edited.
    Edit {
        /// Edited message.
        message: MessageHandle,
        /// New content.
        payload: DisplayPayload,
    },
    /// A message was deleted.
    Delete {
        /// Deleted message.
        message: MessageHandle,
    },
    /// The bot added a reaction.
    AddReaction {
        /// Target message.
        message: MessageHandle,
        /// Added emoji.
        emoji: String,
    },
    /// The bot took one of its own reactions back.
    RemoveOwnReaction {
        /// Target message.
        message: MessageHandle,
        /// Removed emoji.
        emoji: String,
    },
    /// All reactions were cleared.
    ClearReactions {
        /// Target message.
        message: MessageHandle,
    },
    /// A user's reaction was removed.
    RemoveReaction {
        /// Target message.
        message: MessageHandle,
        /// Removed emoji.
        emoji: String,
        /// User whose reaction was removed.
        user: UserId,
    },
}

impl TransportOperation {
    /// Returns the message the operation targeted.
    #[must_use]
    pub const fn message(&self) -> MessageHandle {
        match self {
            Self::Send { message, .. }
            | Self::Edit { message, .. }
            | Self::Delete { message }
            | Self::AddReaction { message, .. }
            | Self::RemoveOwnReaction { message, .. }
            | Self::ClearReactions { message }
            | Self::RemoveReaction { message, .. } => *message,
        }
    }
}

type EventReceiver = Arc<AsyncMutex<mpsc::UnboundedReceiver<ReactionEvent>>>;

#[derive(Debug)]
struct StoredMessage {
    payload: DisplayPayload,
    reactions: Vec<(String, UserId)>,
    events: mpsc::UnboundedSender<ReactionEvent>,
    receiver: EventReceiver,
}

#[derive(Debug)]
struct TransportState {
    bot_user: UserId,
    next_message_id: u64,
    reaction_management_allowed: bool,
    messages: HashMap<MessageHandle, StoredMessage>,
    operations: Vec<TransportOperation>,
}

/// Transport that keeps messages in memory and records every operation.
///
/// Reactions from users are injected with [`InMemoryMessageTransport::react`]
/// and queue per message until the menu waits for them. Reactions the bot
/// adds itself are not delivered as events.
#[derive(Debug, Clone)]
pub struct InMemoryMessageTransport {
    state: Arc<Mutex<TransportState>>,
}

impl Default for InMemoryMessageTransport {
    fn default() -> Self {
        Self::new(UserId::new(0))
    }
}

impl InMemoryMessageTransport {
    /// Creates a transport whose own reactions are attributed to
    /// `bot_user`.
    #[must_use]
    pub fn new(bot_user: UserId) -> Self {
        Self {
            state: Arc::new(Mutex::new(TransportState {
                bot_user,
                next_message_id: 1,
                reaction_management_allowed: true,
                messages: HashMap::new(),
                operations: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> TransportResult<MutexGuard<'_, TransportState>> {
        self.state
            .lock()
            .map_err(|err| TransportError::runtime(std::io::Error::other(err.to_string())))
    }

    /// Controls whether clearing reactions and removing other users'
    /// reactions is permitted, to model a channel where the bot cannot
    /// manage messages. The bot may always remove its own reactions.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Runtime`] when lock acquisition fails.
    pub fn set_reaction_management_allowed(&self, allowed: bool) -> TransportResult<()> {
        self.lock()?.reaction_management_allowed = allowed;
        Ok(())
    }

    /// Adds `user`'s reaction to `message` and queues the event.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MessageNotFound`] for unknown or deleted
    /// messages.
    pub fn react(&self, message: MessageHandle, user: UserId, emoji: &str) -> TransportResult<()> {
        let mut state = self.lock()?;
        let stored = state
            .messages
            .get_mut(&message)
            .ok_or(TransportError::MessageNotFound(message))?;
        stored.reactions.push((emoji.to_owned(), user));
        stored
            .events
            .send(ReactionEvent::new(emoji, user, message))
            .map_err(|_| TransportError::MessageNotFound(message))
    }

    /// Deletes `message` without recording an operation, as if a moderator
    /// removed it.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MessageNotFound`] for unknown messages.
    pub fn delete_externally(&self, message: MessageHandle) -> TransportResult<()> {
        self.lock()?
            .messages
            .remove(&message)
            .map(|_| ())
            .ok_or(TransportError::MessageNotFound(message))
    }

    /// Returns every recorded operation in call order.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Runtime`] when lock acquisition fails.
    pub fn operations(&self) -> TransportResult<Vec<TransportOperation>> {
        Ok(self.lock()?.operations.clone())
    }

    /// Returns the recorded operations that targeted `message`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Runtime`] when lock acquisition fails.
    pub fn operations_for(&self, message: MessageHandle) -> TransportResult<Vec<TransportOperation>> {
        Ok(self
            .lock()?
            .operations
            .iter()
            .filter(|operation| operation.message() == message)
            .cloned()
            .collect())
    }

    /// Returns a message's current content, or `None` once deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Runtime`] when lock acquisition fails.
    pub fn payload(&self, message: MessageHandle) -> TransportResult<Option<DisplayPayload>> {
        Ok(self
            .lock()?
            .messages
            .get(&message)
            .map(|stored| stored.payload.clone()))
    }

    /// Returns the emojis the bot currently has on `message`, in the order
    /// they were added.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MessageNotFound`] for unknown or deleted
    /// messages.
    pub fn bot_reactions(&self, message: MessageHandle) -> TransportResult<Vec<String>> {
        let state = self.lock()?;
        let bot_user = state.bot_user;
        let stored = state
            .messages
            .get(&message)
            .ok_or(TransportError::MessageNotFound(message))?;
        Ok(stored
            .reactions
            .iter()
            .filter(|(_, user)| *user == bot_user)
            .map(|(emoji, _)| emoji.clone())
            .collect())
    }

    fn with_message<F>(&self, message: MessageHandle, mutate: F) -> TransportResult<()>
    where
        F: FnOnce(&mut StoredMessage) -> TransportOperation,
    {
        let mut state = self.lock()?;
        let stored = state
            .messages
            .get_mut(&message)
            .ok_or(TransportError::MessageNotFound(message))?;
        let operation = mutate(stored);
        state.operations.push(operation);
        Ok(())
    }

    fn ensure_reaction_management(&self, message: MessageHandle) -> TransportResult<()> {
        if self.lock()?.reaction_management_allowed {
            Ok(())
        } else {
            Err(TransportError::Forbidden(message))
        }
    }
}

#[async_trait]
impl MessageTransport for InMemoryMessageTransport {
    async fn send(
        &self,
        channel_id: ChannelId,
        payload: &DisplayPayload,
    ) -> TransportResult<MessageHandle> {
        let mut state = self.lock()?;
        let message = MessageHandle::new(channel_id, state.next_message_id);
        state.next_message_id += 1;

        let (events, receiver) = mpsc::unbounded_channel();
        state.messages.insert(
            message,
            StoredMessage {
                payload: payload.clone(),
                reactions: Vec::new(),
                events,
                receiver: Arc::new(AsyncMutex::new(receiver)),
            },
        );
        state.operations.push(TransportOperation::Send {
            message,
            payload: payload.clone(),
        });
        Ok(message)
    }

    async fn edit(&self, message: MessageHandle, payload: &DisplayPayload) -> TransportResult<()> {
        self.with_message(message, |stored| {
            stored.payload = payload.clone();
            TransportOperation::Edit {
                message,
                payload: payload.clone(),
            }
        })
    }

    async fn delete(&self, message: MessageHandle) -> TransportResult<()> {
        let mut state = self.lock()?;
        state
            .messages
            .remove(&message)
            .ok_or(TransportError::MessageNotFound(message))?;
        state.operations.push(TransportOperation::Delete { message });
        Ok(())
    }

    async fn add_reaction(&self, message: MessageHandle, emoji: &str) -> TransportResult<()> {
        let bot_user = self.lock()?.bot_user;
        self.with_message(message, |stored| {
            stored.reactions.push((emoji.to_owned(), bot_user));
            TransportOperation::AddReaction {
                message,
                emoji: emoji.to_owned(),
            }
        })
    }

    async fn remove_own_reaction(&self, message: MessageHandle, emoji: &str) -> TransportResult<()> {
        let bot_user = self.lock()?.bot_user;
        self.with_message(message, |stored| {
            stored
                .reactions
                .retain(|(existing, owner)| !(existing == emoji && *owner == bot_user));
            TransportOperation::RemoveOwnReaction {
                message,
                emoji: emoji.to_owned(),
            }
        })
    }

    async fn clear_reactions(&self, message: MessageHandle) -> TransportResult<()> {
        self.ensure_reaction_management(message)?;
        self.with_message(message, |stored| {
            stored.reactions.clear();
            TransportOperation::ClearReactions { message }
        })
    }

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        emoji: &str,
        user: UserId,
    ) -> TransportResult<()> {
        self.ensure_reaction_management(message)?;
        self.with_message(message, |stored| {
            stored
                .reactions
                .retain(|(existing, owner)| !(existing == emoji && *owner == user));
            TransportOperation::RemoveReaction {
                message,
                emoji: emoji.to_owned(),
                user,
            }
        })
    }

    async fn next_reaction(&self, message: MessageHandle) -> TransportResult<ReactionEvent> {
        let receiver = {
            let state = self.lock()?;
            let stored = state
                .messages
                .get(&message)
                .ok_or(TransportError::MessageNotFound(message))?;
            Arc::clone(&stored.receiver)
        };

        let mut events = receiver.lock().await;
        events
            .recv()
            .await
            .ok_or(TransportError::MessageNotFound(message))
    }
}

//! Identifier types for chat users, channels, and messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a raw user identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chat channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Wraps a raw channel identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle naming one remote message.
///
/// Handles compare by value: two handles naming the same channel and message
/// are equal regardless of where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageHandle {
    channel_id: ChannelId,
    message_id: u64,
}

impl MessageHandle {
    /// Creates a handle from channel and message identifiers.
    #[must_use]
    pub const fn new(channel_id: ChannelId, message_id: u64) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }

    /// Returns the channel the message was posted in.
    #[must_use]
    pub const fn channel_id(self) -> ChannelId {
        self.channel_id
    }

    /// Returns the message identifier within the channel.
    #[must_use]
    pub const fn message_id(self) -> u64 {
        self.message_id
    }
}

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel_id, self.message_id)
    }
}

/// Who invoked a command and where the reply goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvocationContext {
    /// User allowed to drive the resulting menu.
    pub author: UserId,
    /// Channel the menu is posted to.
    pub channel_id: ChannelId,
}

impl InvocationContext {
    /// Creates an invocation context.
    #[must_use]
    pub const fn new(author: UserId, channel_id: ChannelId) -> Self {
        Self { author, channel_id }
    }
}

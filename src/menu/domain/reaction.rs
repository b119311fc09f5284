//! Menu reactions and the events that carry them.

use super::{MessageHandle, UserId};

/// Keycap emojis for the selectable result slots, in slot order.
pub const SELECT_EMOJIS: [&str; 5] = [
    "1\u{FE0F}\u{20E3}",
    "2\u{FE0F}\u{20E3}",
    "3\u{FE0F}\u{20E3}",
    "4\u{FE0F}\u{20E3}",
    "5\u{FE0F}\u{20E3}",
];
/// Previous page.
pub const EMOJI_LEFT: &str = "\u{25C0}\u{FE0F}";
/// Next page.
pub const EMOJI_RIGHT: &str = "\u{25B6}\u{FE0F}";
/// Back to the search page.
pub const EMOJI_RETURN: &str = "\u{21A9}\u{FE0F}";
/// Close the menu.
pub const EMOJI_DISMISS: &str = "\u{274C}";

/// Every control emoji a menu can carry.
pub const CONTROL_EMOJIS: [&str; 9] = [
    EMOJI_LEFT,
    EMOJI_RIGHT,
    SELECT_EMOJIS[0],
    SELECT_EMOJIS[1],
    SELECT_EMOJIS[2],
    SELECT_EMOJIS[3],
    SELECT_EMOJIS[4],
    EMOJI_RETURN,
    EMOJI_DISMISS,
];

/// A menu control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    /// Open the result in the given zero-based slot of the current page.
    Select(usize),
    /// Previous page.
    Left,
    /// Next page.
    Right,
    /// Back from a detail view to its search page.
    Return,
    /// Delete the menu.
    Dismiss,
}

impl Reaction {
    /// Returns the emoji used for this control, or `None` for a slot that
    /// has no keycap.
    #[must_use]
    pub fn emoji(self) -> Option<&'static str> {
        match self {
            Self::Select(slot) => SELECT_EMOJIS.get(slot).copied(),
            Self::Left => Some(EMOJI_LEFT),
            Self::Right => Some(EMOJI_RIGHT),
            Self::Return => Some(EMOJI_RETURN),
            Self::Dismiss => Some(EMOJI_DISMISS),
        }
    }

    /// Maps an emoji back to its control.
    #[must_use]
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        match emoji {
            EMOJI_LEFT => Some(Self::Left),
            EMOJI_RIGHT => Some(Self::Right),
            EMOJI_RETURN => Some(Self::Return),
            EMOJI_DISMISS => Some(Self::Dismiss),
            _ => SELECT_EMOJIS
                .iter()
                .position(|candidate| *candidate == emoji)
                .map(Self::Select),
        }
    }
}

/// A reaction added to a message by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Emoji as delivered by the chat service.
    pub emoji: String,
    /// User who reacted.
    pub user: UserId,
    /// Message that was reacted to.
    pub message: MessageHandle,
}

impl ReactionEvent {
    /// Creates a reaction event.
    #[must_use]
    pub fn new(emoji: impl Into<String>, user: UserId, message: MessageHandle) -> Self {
        Self {
            emoji: emoji.into(),
            user,
            message,
        }
    }

    /// Returns the menu control this event represents, if any.
    #[must_use]
    pub fn reaction(&self) -> Option<Reaction> {
        Reaction::from_emoji(&self.emoji)
    }
}

//! Domain model for reaction-driven menus.
//!
//! Everything here is free of I/O: identifiers, reaction controls, the menu
//! view state machine, display payloads, chat command parsing, and the
//! interaction state cached for each live menu.

mod command;
mod ids;
mod payload;
mod reaction;
mod state;
mod view;

pub use command::{CommandParseError, LinkError, LinkTarget, MenuCommand};
pub use ids::{ChannelId, InvocationContext, MessageHandle, UserId};
pub use payload::{DisplayPayload, PayloadField};
pub use reaction::{
    CONTROL_EMOJIS, EMOJI_DISMISS, EMOJI_LEFT, EMOJI_RETURN, EMOJI_RIGHT, Reaction,
    ReactionEvent, SELECT_EMOJIS,
};
#[cfg(test)]
pub use state::MockEvictable;
pub use state::{Evictable, InteractionState, QueryInteractionState};
pub use view::{MenuView, Paging};

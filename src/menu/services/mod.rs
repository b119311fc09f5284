//! Application services for menus: the state cache, the per-message
//! controller, eviction cleanup, and command execution.

mod cache;
mod cleanup;
mod controller;
mod lookup;

pub use cache::{CacheError, CacheResult, MessageStateCache, SharedInteractionState};
pub use cleanup::ReactionCleanup;
pub use controller::{
    ControllerError, ControllerResult, InteractionController, MenuHandle, MenuOutcome,
};
pub use lookup::{BOT_VERSION, LookupError, LookupResult, LookupService};

//! Adapter implementations for menu ports.

pub mod memory;
pub mod render;

pub use memory::{InMemoryMessageTransport, TransportOperation};
pub use render::EmbedRenderer;

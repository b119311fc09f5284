//! Port contracts for menu rendering and chat transport.

pub mod renderer;
pub mod transport;

pub use renderer::{MenuRenderer, RenderError, RenderResult};
pub use transport::{MessageTransport, TransportError, TransportResult};

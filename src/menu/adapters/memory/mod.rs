//! In-memory adapters for deterministic tests and local runs.

mod transport;

pub use transport::{InMemoryMessageTransport, TransportOperation};

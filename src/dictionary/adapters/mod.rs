//! Adapter implementations for dictionary ports.

pub mod jisho;
pub mod memory;

pub use jisho::JishoClient;
pub use memory::InMemoryDictionary;

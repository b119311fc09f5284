//! Port contracts for dictionary lookups.

pub mod client;

pub use client::{DictionaryClient, DictionaryError, DictionaryResult};

//! Dictionary lookups against jisho.org.
//!
//! The dictionary context owns the entry model returned by the search API
//! and the client contract used by the menu services. It follows the same
//! hexagonal split as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;

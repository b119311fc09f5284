//! Reaction-driven result menus.
//!
//! A menu is a bot message whose reactions act as buttons. The menu context
//! keeps an LRU cache of per-message interaction state, drives each open
//! menu through its view transitions, and maps chat commands onto
//! dictionary lookups.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Application services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

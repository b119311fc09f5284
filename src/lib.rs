//! Jisho bot: reaction-driven dictionary menus.
//!
//! This crate provides the core of a chat bot that searches the jisho.org
//! dictionary and presents the results as messages users page through by
//! reacting with emoji.
//!
//! # Architecture
//!
//! The bot follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, chat, etc.)
//!
//! # Modules
//!
//! - [`config`]: Cache, paging, and timeout settings
//! - [`dictionary`]: Dictionary entry model and jisho.org client
//! - [`menu`]: Interaction state cache, menu controller, and commands

pub mod config;
pub mod dictionary;
pub mod menu;

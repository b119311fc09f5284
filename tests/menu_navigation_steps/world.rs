//! Shared world state for menu navigation BDD scenarios.

use jisho_bot::config::MenuConfig;
use jisho_bot::dictionary::{
    adapters::InMemoryDictionary,
    domain::{DictionaryEntry, JapaneseForm, Sense},
};
use jisho_bot::menu::{
    adapters::{EmbedRenderer, InMemoryMessageTransport},
    domain::{
        ChannelId, EMOJI_DISMISS, EMOJI_LEFT, EMOJI_RETURN, EMOJI_RIGHT, InvocationContext,
        MessageHandle, Paging, SELECT_EMOJIS, UserId,
    },
    services::{InteractionController, LookupService, MenuHandle, MessageStateCache},
};
use rstest::fixture;
use std::sync::Arc;

/// Lookup service type used by the BDD world.
pub type TestLookupService =
    LookupService<InMemoryDictionary, InMemoryMessageTransport, EmbedRenderer>;

/// User who issues commands.
pub const AUTHOR: UserId = UserId::new(10);

/// User who reacts to someone else's menu.
pub const BYSTANDER: UserId = UserId::new(20);

/// Scenario world for menu navigation behaviour tests.
pub struct NavigationWorld {
    pub dictionary: Arc<InMemoryDictionary>,
    pub transport: Arc<InMemoryMessageTransport>,
    pub service: TestLookupService,
    pub handle: Option<MenuHandle>,
    pub message: Option<MessageHandle>,
}

impl NavigationWorld {
    /// Creates a world with default menu settings.
    #[must_use]
    pub fn new() -> Self {
        let config = MenuConfig::default();
        let dictionary = Arc::new(InMemoryDictionary::new());
        let transport = Arc::new(InMemoryMessageTransport::default());
        let controller = InteractionController::new(
            Arc::clone(&transport),
            Arc::new(EmbedRenderer::new(Paging::new(config.page_size))),
            Arc::new(MessageStateCache::new(config.cache_capacity)),
            &config,
        )
        .expect("default menu config is valid");
        Self {
            service: LookupService::new(Arc::clone(&dictionary), controller),
            dictionary,
            transport,
            handle: None,
            message: None,
        }
    }

    /// Returns the context commands are issued in.
    #[must_use]
    pub const fn context() -> InvocationContext {
        InvocationContext::new(AUTHOR, ChannelId::new(3))
    }

    /// Returns the menu opened by the last command.
    ///
    /// # Errors
    ///
    /// Returns an error if no command has run yet.
    pub fn message(&self) -> Result<MessageHandle, eyre::Report> {
        self.message
            .ok_or_else(|| eyre::eyre!("no menu has been opened in this scenario"))
    }
}

impl Default for NavigationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds `count` entries with slugs `{query}0`, `{query}1`, …
#[must_use]
pub fn entries(query: &str, count: usize) -> Vec<DictionaryEntry> {
    (0..count)
        .map(|position| {
            let slug = format!("{query}{position}");
            DictionaryEntry::new(&slug, JapaneseForm::new(Some(&slug), None)).with_sense(Sense {
                english_definitions: vec![format!("meaning {position}")],
                ..Sense::default()
            })
        })
        .collect()
}

/// Maps a control name such as `right` or `select 2` to its emoji.
///
/// # Errors
///
/// Returns an error for unknown control names.
pub fn control_emoji(control: &str) -> Result<&'static str, eyre::Report> {
    match control {
        "left" => Ok(EMOJI_LEFT),
        "right" => Ok(EMOJI_RIGHT),
        "return" => Ok(EMOJI_RETURN),
        "dismiss" => Ok(EMOJI_DISMISS),
        other => {
            let number = other
                .strip_prefix("select ")
                .and_then(|slot| slot.parse::<usize>().ok())
                .ok_or_else(|| eyre::eyre!("unknown control '{other}'"))?;
            number
                .checked_sub(1)
                .and_then(|slot| SELECT_EMOJIS.get(slot).copied())
                .ok_or_else(|| eyre::eyre!("no keycap for slot {number}"))
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NavigationWorld {
    NavigationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Runtime configuration for menus and the dictionary client.
//!
//! Defaults mirror the bot's long-standing constants: ten live menus, five
//! results per page and a one minute reaction window.

use serde::Deserialize;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the menu cache capacity.
pub const ENV_CACHE_CAPACITY: &str = "JISHO_CACHE_CAPACITY";
/// Environment variable holding the number of results per page.
pub const ENV_PAGE_SIZE: &str = "JISHO_PAGE_SIZE";
/// Environment variable holding the reaction wait window in seconds.
pub const ENV_REACTION_TIMEOUT_SECS: &str = "JISHO_REACTION_TIMEOUT_SECS";

/// Largest page size that can be addressed with number reactions.
pub const MAX_PAGE_SIZE: usize = 5;

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = non_zero(10);
const DEFAULT_PAGE_SIZE: NonZeroUsize = non_zero(MAX_PAGE_SIZE);
const DEFAULT_REACTION_TIMEOUT: Duration = Duration::from_secs(60);

const fn non_zero(value: usize) -> NonZeroUsize {
    match NonZeroUsize::new(value) {
        Some(non_zero) => non_zero,
        None => NonZeroUsize::MIN,
    }
}

/// Errors raised while building or validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was present but could not be parsed.
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
    },

    /// The cache must hold at least one menu.
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,

    /// The page size is outside `1..=5`.
    #[error("page size {0} is out of range, expected 1 to {MAX_PAGE_SIZE}")]
    PageSizeOutOfRange(usize),

    /// The reaction window must be positive.
    #[error("reaction timeout must be greater than zero")]
    ZeroTimeout,
}

/// Menu behaviour settings.
///
/// # Examples
///
/// ```
/// use jisho_bot::config::MenuConfig;
/// use std::time::Duration;
///
/// let config = MenuConfig::default().with_reaction_timeout(Duration::from_secs(30));
/// assert_eq!(config.page_size.get(), 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Maximum number of live menus tracked at once.
    pub cache_capacity: NonZeroUsize,
    /// Results shown per search page.
    pub page_size: NonZeroUsize,
    /// How long a menu waits for a reaction before closing.
    pub reaction_timeout: Duration,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            reaction_timeout: DEFAULT_REACTION_TIMEOUT,
        }
    }
}

impl MenuConfig {
    /// Sets the cache capacity.
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the reaction wait window.
    #[must_use]
    pub const fn with_reaction_timeout(mut self, timeout: Duration) -> Self {
        self.reaction_timeout = timeout;
        self
    }

    /// Checks the settings against the limits menus can honour.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PageSizeOutOfRange`] when more results per page
    /// are requested than there are number reactions, or
    /// [`ConfigError::ZeroTimeout`] for an empty wait window.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size.get() > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeOutOfRange(self.page_size.get()));
        }
        if self.reaction_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Reads settings from the process environment, keeping defaults for
    /// unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or the resulting
    /// settings fail validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, keeping defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is malformed or the resulting
    /// settings fail validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(capacity) = read_number::<usize>(&lookup, ENV_CACHE_CAPACITY)? {
            config.cache_capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::ZeroCapacity)?;
        }
        if let Some(page_size) = read_number::<usize>(&lookup, ENV_PAGE_SIZE)? {
            config.page_size =
                NonZeroUsize::new(page_size).ok_or(ConfigError::PageSizeOutOfRange(page_size))?;
        }
        if let Some(seconds) = read_number::<u64>(&lookup, ENV_REACTION_TIMEOUT_SECS)? {
            config.reaction_timeout = Duration::from_secs(seconds);
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key).filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_owned(),
            value: raw.clone(),
        })
}

/// Settings for the jisho.org HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JishoClientConfig {
    /// Word search endpoint.
    pub search_url: String,
}

impl JishoClientConfig {
    /// Public jisho.org word search endpoint.
    pub const DEFAULT_SEARCH_URL: &'static str = "http://jisho.org/api/v1/search/words";
}

impl Default for JishoClientConfig {
    fn default() -> Self {
        Self {
            search_url: Self::DEFAULT_SEARCH_URL.to_owned(),
        }
    }
}

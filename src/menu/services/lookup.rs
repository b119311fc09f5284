//! Command service: turns chat commands into dictionary lookups and menus.

use crate::dictionary::{
    domain::ResultList,
    ports::{DictionaryClient, DictionaryError},
};
use crate::menu::{
    domain::{InvocationContext, LinkTarget, MenuCommand},
    ports::{MenuRenderer, MessageTransport},
    services::{ControllerError, InteractionController, MenuHandle},
};
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Bot version reported by the `version` command.
pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service-level errors for command execution.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The menu could not be opened.
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Result type for command execution.
pub type LookupResult<T> = Result<T, LookupError>;

/// Executes chat commands.
///
/// Every command answers with a menu; failures the user can act on (a bad
/// command, an unreachable dictionary, a missing result) are shown as
/// dismissible error notices rather than returned.
pub struct LookupService<D, T, R>
where
    D: DictionaryClient,
    T: MessageTransport + 'static,
    R: MenuRenderer + 'static,
{
    dictionary: Arc<D>,
    controller: InteractionController<T, R>,
}

impl<D, T, R> LookupService<D, T, R>
where
    D: DictionaryClient,
    T: MessageTransport + 'static,
    R: MenuRenderer + 'static,
{
    /// Creates a command service.
    #[must_use]
    pub const fn new(dictionary: Arc<D>, controller: InteractionController<T, R>) -> Self {
        Self {
            dictionary,
            controller,
        }
    }

    /// Parses and executes a command line.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the reply menu cannot be opened.
    pub async fn execute(&self, context: InvocationContext, input: &str) -> LookupResult<MenuHandle> {
        match MenuCommand::parse(input) {
            Ok(command) => self.dispatch(context, command).await,
            Err(err) => self.error_notice(context, &err.to_string()).await,
        }
    }

    /// Executes an already parsed command.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the reply menu cannot be opened.
    pub async fn dispatch(
        &self,
        context: InvocationContext,
        command: MenuCommand,
    ) -> LookupResult<MenuHandle> {
        match command {
            MenuCommand::Search { query } => self.search(context, &query).await,
            MenuCommand::Details { number, query } => self.details(context, number, &query).await,
            MenuCommand::Link(target) => self.link(context, target).await,
            MenuCommand::Ping => self.notice(context, "Pong!", "jisho-bot is up").await,
            MenuCommand::Version => {
                self.notice(context, "jisho-bot version", BOT_VERSION).await
            }
        }
    }

    /// Searches for `query` and opens the results menu.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the reply menu cannot be opened.
    pub async fn search(&self, context: InvocationContext, query: &str) -> LookupResult<MenuHandle> {
        let results = match self.fetch(query).await {
            Ok(results) => results,
            Err(err) => return self.error_notice(context, &err.to_string()).await,
        };
        Ok(self.controller.start_search(context, query, results).await?)
    }

    /// Searches for `query` and opens the `number`th result.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the reply menu cannot be opened.
    pub async fn details(
        &self,
        context: InvocationContext,
        number: NonZeroUsize,
        query: &str,
    ) -> LookupResult<MenuHandle> {
        let results = match self.fetch(query).await {
            Ok(results) => results,
            Err(err) => return self.error_notice(context, &err.to_string()).await,
        };
        let index = number.get() - 1;
        Ok(self
            .controller
            .start_detail(context, query, results, index)
            .await?)
    }

    /// Opens whatever a jisho.org link points at. Word links open the
    /// result whose slug matches, falling back to the first result.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the reply menu cannot be opened.
    pub async fn link(&self, context: InvocationContext, target: LinkTarget) -> LookupResult<MenuHandle> {
        match target {
            LinkTarget::Search(query) => self.search(context, &query).await,
            LinkTarget::Word(slug) => {
                let results = match self.fetch(&slug).await {
                    Ok(results) => results,
                    Err(err) => return self.error_notice(context, &err.to_string()).await,
                };
                let index = results
                    .iter()
                    .position(|entry| entry.slug == slug)
                    .unwrap_or_default();
                Ok(self
                    .controller
                    .start_detail(context, &slug, results, index)
                    .await?)
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<ResultList, DictionaryError> {
        self.dictionary.search(query).await.inspect_err(|err| {
            warn!(query, error = %err, "dictionary search failed");
        })
    }

    async fn notice(
        &self,
        context: InvocationContext,
        title: &str,
        message: &str,
    ) -> LookupResult<MenuHandle> {
        let payload = self.controller.renderer().render_notice(title, message);
        Ok(self.controller.start_notice(context, payload).await?)
    }

    async fn error_notice(&self, context: InvocationContext, message: &str) -> LookupResult<MenuHandle> {
        let payload = self.controller.renderer().render_error(message);
        Ok(self.controller.start_notice(context, payload).await?)
    }
}

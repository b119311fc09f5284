//! Reaction-driven menu controller.
//!
//! Every menu message runs its own task: wait for a qualifying reaction or
//! the deadline, act on it, and wait again. Side effects for one step are
//! strictly ordered: edit the message, drop stale reactions, add the new
//! controls, then start the next wait.

use crate::config::{ConfigError, MenuConfig};
use crate::dictionary::domain::ResultList;
use crate::menu::{
    domain::{
        DisplayPayload, InteractionState, InvocationContext, MenuView, MessageHandle, Paging,
        QueryInteractionState, Reaction, UserId,
    },
    ports::{MenuRenderer, MessageTransport, RenderError, TransportError},
    services::{
        CacheError, MessageStateCache, ReactionCleanup, SharedInteractionState,
        cleanup::remove_own_controls,
    },
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Errors surfaced by the controller. Expected outcomes such as timeouts,
/// cache misses and deleted messages are reported as [`MenuOutcome`]s
/// instead.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A transport operation failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The cache is unusable.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// A search or detail menu was cached without its search context.
    #[error("menu {0} has no search context")]
    MissingQueryState(MessageHandle),
    /// The menu task panicked or was aborted.
    #[error("menu task failed: {0}")]
    Task(String),
}

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// How a menu ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The author dismissed the menu and the message was deleted.
    Dismissed,
    /// No qualifying reaction arrived in time.
    TimedOut,
    /// The state was evicted from the cache while the menu was open.
    Evicted,
    /// The message was deleted by someone else.
    Vanished,
}

impl MenuOutcome {
    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dismissed => "dismissed",
            Self::TimedOut => "timed_out",
            Self::Evicted => "evicted",
            Self::Vanished => "vanished",
        }
    }
}

/// Handle to a running menu.
#[derive(Debug)]
pub struct MenuHandle {
    message: MessageHandle,
    task: JoinHandle<ControllerResult<MenuOutcome>>,
}

impl MenuHandle {
    /// Returns the menu's message.
    #[must_use]
    pub const fn message(&self) -> MessageHandle {
        self.message
    }

    /// Waits for the menu to end.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the menu task, or
    /// [`ControllerError::Task`] if the task panicked.
    pub async fn finished(self) -> ControllerResult<MenuOutcome> {
        self.task
            .await
            .map_err(|err| ControllerError::Task(err.to_string()))?
    }
}

enum WaitOutcome {
    Reacted { reaction: Reaction, user: UserId },
    TimedOut,
    Vanished,
}

#[derive(Debug, Clone, Copy)]
struct MenuSession {
    message: MessageHandle,
    author: UserId,
    result_count: usize,
    view: MenuView,
}

/// Opens menus and drives their reaction loops.
pub struct InteractionController<T, R>
where
    T: MessageTransport + 'static,
    R: MenuRenderer + 'static,
{
    transport: Arc<T>,
    renderer: Arc<R>,
    cache: Arc<MessageStateCache>,
    paging: Paging,
    reaction_timeout: Duration,
}

impl<T, R> Clone for InteractionController<T, R>
where
    T: MessageTransport + 'static,
    R: MenuRenderer + 'static,
{
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            renderer: Arc::clone(&self.renderer),
            cache: Arc::clone(&self.cache),
            paging: self.paging,
            reaction_timeout: self.reaction_timeout,
        }
    }
}

impl<T, R> InteractionController<T, R>
where
    T: MessageTransport + 'static,
    R: MenuRenderer + 'static,
{
    /// Creates a controller sharing `cache` with any other controllers.
    ///
    /// The renderer must page with [`InteractionController::paging`] of the
    /// same `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails
    /// [`MenuConfig::validate`], for example a page size with more slots
    /// than there are number reactions.
    pub fn new(
        transport: Arc<T>,
        renderer: Arc<R>,
        cache: Arc<MessageStateCache>,
        config: &MenuConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transport,
            renderer,
            cache,
            paging: Paging::new(config.page_size),
            reaction_timeout: config.reaction_timeout,
        })
    }

    /// Returns the paging the controller offers number reactions for.
    #[must_use]
    pub const fn paging(&self) -> Paging {
        self.paging
    }

    /// Returns the renderer used for menu content.
    #[must_use]
    pub const fn renderer(&self) -> &Arc<R> {
        &self.renderer
    }

    /// Returns the shared state cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<MessageStateCache> {
        &self.cache
    }

    /// Opens a search results menu on the first page. An empty result list
    /// opens a dismiss-only "no results" notice instead.
    ///
    /// Returns once the message is posted and its first wait has begun.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] when rendering, posting, or caching fails.
    pub async fn start_search(
        &self,
        context: InvocationContext,
        query: &str,
        results: ResultList,
    ) -> ControllerResult<MenuHandle> {
        let payload = self.renderer.render_search(query, &results, 0)?;
        if results.is_empty() {
            return self.start_notice(context, payload).await;
        }

        let result_count = results.len();
        let search = QueryInteractionState::new(query, results, 0);
        self.open(
            context,
            &payload,
            MenuView::SearchPage { offset: 0 },
            result_count,
            Some(search),
        )
        .await
    }

    /// Opens the detail view of the result at zero-based `index`. An index
    /// outside the results opens an error notice instead.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] when rendering, posting, or caching fails.
    pub async fn start_detail(
        &self,
        context: InvocationContext,
        query: &str,
        results: ResultList,
        index: usize,
    ) -> ControllerResult<MenuHandle> {
        let payload = match self.renderer.render_detail(query, &results, index) {
            Ok(payload) => payload,
            Err(RenderError::IndexOutOfRange { .. }) => {
                let message = format!(
                    "Unable to find result number {number} for {query}",
                    number = index.saturating_add(1)
                );
                let notice = self.renderer.render_error(&message);
                return self.start_notice(context, notice).await;
            }
            Err(err) => return Err(err.into()),
        };

        let result_count = results.len();
        let search = QueryInteractionState::new(query, results, self.paging.page_start(index));
        self.open(
            context,
            &payload,
            MenuView::DetailView { index },
            result_count,
            Some(search),
        )
        .await
    }

    /// Opens a notice that its author can only dismiss.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] when posting or caching fails.
    pub async fn start_notice(
        &self,
        context: InvocationContext,
        payload: DisplayPayload,
    ) -> ControllerResult<MenuHandle> {
        self.open(context, &payload, MenuView::DismissOnly, 0, None)
            .await
    }

    async fn open(
        &self,
        context: InvocationContext,
        payload: &DisplayPayload,
        view: MenuView,
        result_count: usize,
        search: Option<QueryInteractionState>,
    ) -> ControllerResult<MenuHandle> {
        let message = self.transport.send(context.channel_id, payload).await?;
        let cleanup = Arc::new(ReactionCleanup::new(Arc::clone(&self.transport)));
        let mut state = InteractionState::new(context.author, message, cleanup);
        if let Some(search) = search {
            state = state.with_query(search);
        }
        self.cache.insert(state).await?;

        let session = MenuSession {
            message,
            author: context.author,
            result_count,
            view,
        };

        let task = match self.add_controls(session).await {
            Ok(()) => {
                let (ready, waiting) = oneshot::channel();
                let task = tokio::spawn(self.clone().run(session, ready));
                if waiting.await.is_err() {
                    debug!(%message, "menu task ended before its first wait");
                }
                task
            }
            Err(ControllerError::Transport(err)) if err.is_vanished() => {
                self.forget(message)?;
                tokio::spawn(async { Ok::<_, ControllerError>(MenuOutcome::Vanished) })
            }
            Err(err) => {
                self.forget(message)?;
                return Err(err);
            }
        };
        debug!(%message, view = ?view, "menu opened");
        Ok(MenuHandle { message, task })
    }

    async fn run(
        self,
        mut session: MenuSession,
        ready: oneshot::Sender<()>,
    ) -> ControllerResult<MenuOutcome> {
        let mut ready = Some(ready);
        let outcome = loop {
            let (reaction, user) = match self.wait_for_reaction(session, ready.take()).await? {
                WaitOutcome::Reacted { reaction, user } => (reaction, user),
                WaitOutcome::TimedOut => break self.expire(session).await?,
                WaitOutcome::Vanished => {
                    self.forget(session.message)?;
                    break MenuOutcome::Vanished;
                }
            };

            let state = match self.cache.lookup(session.message) {
                Ok(state) => state,
                Err(CacheError::NotFound(_)) => {
                    debug!(message = %session.message, "dropping reaction for evicted menu");
                    break MenuOutcome::Evicted;
                }
                Err(err) => return Err(err.into()),
            };

            match self.step(&state, session, reaction, user).await {
                Ok(next) if next.is_terminal() => break MenuOutcome::Dismissed,
                Ok(next) => session.view = next,
                Err(ControllerError::Transport(err)) if err.is_vanished() => {
                    self.forget(session.message)?;
                    break MenuOutcome::Vanished;
                }
                Err(err) => return Err(err),
            }
        };

        info!(message = %session.message, outcome = outcome.as_str(), "menu closed");
        Ok(outcome)
    }

    /// Races the next qualifying reaction against the wait deadline. The
    /// losing future is dropped. `ready` fires once the deadline is armed.
    async fn wait_for_reaction(
        &self,
        session: MenuSession,
        ready: Option<oneshot::Sender<()>>,
    ) -> ControllerResult<WaitOutcome> {
        let legal = session
            .view
            .legal_reactions(session.result_count, self.paging);
        let deadline = Instant::now() + self.reaction_timeout;
        if let Some(ready) = ready
            && ready.send(()).is_err()
        {
            debug!(message = %session.message, "menu opener stopped waiting");
        }

        loop {
            tokio::select! {
                () = tokio::time::sleep_until(deadline) => return Ok(WaitOutcome::TimedOut),
                event = self.transport.next_reaction(session.message) => {
                    let event = match event {
                        Ok(event) => event,
                        Err(err) if err.is_vanished() => return Ok(WaitOutcome::Vanished),
                        Err(err) => return Err(err.into()),
                    };
                    if event.user != session.author {
                        continue;
                    }
                    if let Some(reaction) = event.reaction().filter(|candidate| legal.contains(candidate)) {
                        return Ok(WaitOutcome::Reacted { reaction, user: event.user });
                    }
                }
            }
        }
    }

    /// Applies one reaction and returns the view now shown.
    async fn step(
        &self,
        state: &SharedInteractionState,
        session: MenuSession,
        reaction: Reaction,
        user: UserId,
    ) -> ControllerResult<MenuView> {
        let current = session.view;
        let Some(next) = current.apply(reaction, session.result_count, self.paging) else {
            self.release(session.message, reaction, user).await?;
            return Ok(current);
        };

        if next.is_terminal() {
            self.transport.delete(session.message).await?;
            self.forget(session.message)?;
            return Ok(next);
        }

        let payload = match self.render(state, next) {
            Ok(payload) => payload,
            Err(ControllerError::Render(RenderError::IndexOutOfRange { index, len })) => {
                debug!(index, len, "ignoring selection of a missing result");
                let unchanged = self.render(state, current)?;
                self.transport.edit(session.message, &unchanged).await?;
                self.release(session.message, reaction, user).await?;
                return Ok(current);
            }
            Err(err) => return Err(err),
        };

        if let (MenuView::SearchPage { offset }, Some(search)) = (next, state.query()) {
            search.set_offset(offset);
        }

        self.transport.edit(session.message, &payload).await?;
        if current.shares_controls_with(next) {
            self.release(session.message, reaction, user).await?;
        } else {
            self.clear_controls(session).await?;
            self.add_controls(MenuSession {
                view: next,
                ..session
            })
            .await?;
        }
        Ok(next)
    }

    fn render(&self, state: &InteractionState, view: MenuView) -> ControllerResult<DisplayPayload> {
        let search = state
            .query()
            .ok_or(ControllerError::MissingQueryState(state.message()))?;
        let payload = match view {
            MenuView::SearchPage { offset } => {
                self.renderer
                    .render_search(search.query(), search.response(), offset)?
            }
            MenuView::DetailView { index } => {
                self.renderer
                    .render_detail(search.query(), search.response(), index)?
            }
            MenuView::DismissOnly | MenuView::Terminated => {
                return Err(ControllerError::MissingQueryState(state.message()));
            }
        };
        Ok(payload)
    }

    async fn add_controls(&self, session: MenuSession) -> ControllerResult<()> {
        for reaction in session
            .view
            .legal_reactions(session.result_count, self.paging)
        {
            if let Some(emoji) = reaction.emoji() {
                self.transport.add_reaction(session.message, emoji).await?;
            }
        }
        Ok(())
    }

    /// Clears every reaction on the menu. Without permission to do so, the
    /// bot takes back the controls it added for `session.view`.
    async fn clear_controls(&self, session: MenuSession) -> ControllerResult<()> {
        let message = session.message;
        match self.transport.clear_reactions(message).await {
            Ok(()) => Ok(()),
            Err(TransportError::Forbidden(_)) => {
                debug!(%message, "cannot clear reactions, removing own controls");
                let emojis = session
                    .view
                    .legal_reactions(session.result_count, self.paging)
                    .into_iter()
                    .filter_map(Reaction::emoji);
                Ok(remove_own_controls(self.transport.as_ref(), message, emojis).await?)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Takes the author's reaction back off so the control can be pressed
    /// again.
    async fn release(
        &self,
        message: MessageHandle,
        reaction: Reaction,
        user: UserId,
    ) -> ControllerResult<()> {
        let Some(emoji) = reaction.emoji() else {
            return Ok(());
        };
        match self.transport.remove_reaction(message, emoji, user).await {
            Ok(()) => Ok(()),
            Err(TransportError::Forbidden(_)) => {
                debug!(%message, "cannot remove user reaction without permission");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn expire(&self, session: MenuSession) -> ControllerResult<MenuOutcome> {
        match self.clear_controls(session).await {
            Ok(()) => {}
            Err(ControllerError::Transport(err)) if err.is_vanished() => {}
            Err(err) => warn!(message = %session.message, error = %err, "failed to clear reactions on expired menu"),
        }
        self.forget(session.message)?;
        Ok(MenuOutcome::TimedOut)
    }

    /// Drops the cached state without cleanup; a miss means the state was
    /// already evicted.
    fn forget(&self, message: MessageHandle) -> ControllerResult<()> {
        match self.cache.remove(message) {
            Ok(_) | Err(CacheError::NotFound(_)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

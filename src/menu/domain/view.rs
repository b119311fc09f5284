//! The per-message menu state machine.
//!
//! A menu shows either one page of search results, the detail view of a
//! single result, or a notice that can only be dismissed. Reactions move
//! between these views; [`MenuView::apply`] is the full transition table.

use super::Reaction;
use std::num::NonZeroUsize;

/// Page arithmetic over a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    page_size: NonZeroUsize,
}

impl Paging {
    /// Creates paging with the given number of results per page.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self { page_size }
    }

    /// Returns the number of results per page.
    #[must_use]
    pub const fn page_size(self) -> usize {
        self.page_size.get()
    }

    /// Returns the offset of the page containing `index`.
    #[must_use]
    pub const fn page_start(self, index: usize) -> usize {
        index - index.rem_euclid(self.page_size.get())
    }

    /// Returns `true` when `result_count` results need more than one page.
    #[must_use]
    pub const fn has_multiple_pages(self, result_count: usize) -> bool {
        result_count > self.page_size.get()
    }

    /// Returns the number of results shown on the page starting at
    /// `offset`.
    #[must_use]
    pub const fn visible(self, offset: usize, result_count: usize) -> usize {
        let remaining = result_count.saturating_sub(offset);
        if remaining < self.page_size.get() {
            remaining
        } else {
            self.page_size.get()
        }
    }

    /// Returns the offset of the next page if it holds any results.
    #[must_use]
    pub const fn next_offset(self, offset: usize, result_count: usize) -> Option<usize> {
        match offset.checked_add(self.page_size.get()) {
            Some(next) if next < result_count => Some(next),
            _ => None,
        }
    }

    /// Returns the offset of the previous page, or `None` on the first page.
    #[must_use]
    pub const fn previous_offset(self, offset: usize) -> Option<usize> {
        offset.checked_sub(self.page_size.get())
    }

    /// Resolves a slot on the page at `offset` to a result index.
    #[must_use]
    pub const fn select(self, offset: usize, slot: usize, result_count: usize) -> Option<usize> {
        if slot >= self.page_size.get() {
            return None;
        }
        match offset.checked_add(slot) {
            Some(index) if index < result_count => Some(index),
            _ => None,
        }
    }
}

/// What a menu message currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuView {
    /// One page of search results starting at `offset`.
    SearchPage {
        /// Index of the first result on the page.
        offset: usize,
    },
    /// Details of the result at `index`.
    DetailView {
        /// Index of the shown result.
        index: usize,
    },
    /// A notice with no navigation.
    DismissOnly,
    /// The menu is closed; no further reactions are handled.
    Terminated,
}

impl MenuView {
    /// Returns `true` for the closed state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Returns `true` when `self` and `other` offer the same controls, so a
    /// transition between them can keep the existing reactions.
    #[must_use]
    pub const fn shares_controls_with(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::SearchPage { .. }, Self::SearchPage { .. })
                | (Self::DetailView { .. }, Self::DetailView { .. })
                | (Self::DismissOnly, Self::DismissOnly)
        )
    }

    /// Returns the controls offered in this view, in display order.
    ///
    /// Arrows are only offered when the results span more than one page,
    /// and only as many number slots as the largest page can fill.
    #[must_use]
    pub fn legal_reactions(self, result_count: usize, paging: Paging) -> Vec<Reaction> {
        match self {
            Self::SearchPage { .. } => {
                let mut reactions = Vec::new();
                if paging.has_multiple_pages(result_count) {
                    reactions.extend([Reaction::Left, Reaction::Right]);
                }
                reactions.extend((0..paging.visible(0, result_count)).map(Reaction::Select));
                reactions.push(Reaction::Dismiss);
                reactions
            }
            Self::DetailView { .. } => vec![Reaction::Return, Reaction::Dismiss],
            Self::DismissOnly => vec![Reaction::Dismiss],
            Self::Terminated => Vec::new(),
        }
    }

    /// Applies a reaction, returning the next view or `None` when the
    /// reaction is ignored in this view.
    ///
    /// Page moves and selections that would leave `[0, result_count)` are
    /// ignored, so a search page never lands on an empty page.
    #[must_use]
    pub const fn apply(self, reaction: Reaction, result_count: usize, paging: Paging) -> Option<Self> {
        match (self, reaction) {
            (Self::Terminated, _) => None,
            (_, Reaction::Dismiss) => Some(Self::Terminated),
            (Self::SearchPage { offset }, Reaction::Select(slot)) => {
                match paging.select(offset, slot, result_count) {
                    Some(index) => Some(Self::DetailView { index }),
                    None => None,
                }
            }
            (Self::SearchPage { offset }, Reaction::Left) => match paging.previous_offset(offset) {
                Some(previous) => Some(Self::SearchPage { offset: previous }),
                None => None,
            },
            (Self::SearchPage { offset }, Reaction::Right) => {
                match paging.next_offset(offset, result_count) {
                    Some(next) => Some(Self::SearchPage { offset: next }),
                    None => None,
                }
            }
            (Self::DetailView { index }, Reaction::Return) => Some(Self::SearchPage {
                offset: paging.page_start(index),
            }),
            _ => None,
        }
    }
}

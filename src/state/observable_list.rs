//! Selectable list widget state with post-navigation observers.
//!
//! The highlighted row lives here (in ratatui's `ListState`) and nowhere
//! else. Navigation applies its own effect first, then notifies every
//! registered listener on the same call stack, so listeners always observe
//! the post-navigation highlight.

use crate::state::listeners::{ListenerId, Listeners};
use ratatui::widgets::ListState;

/// One navigation step on a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Up one row, stopping at the first.
    Up,
    /// Down one row, stopping at the last.
    Down,
    /// Down one viewport of rows, stopping at the last.
    DownViewport,
}

/// Implemented by whatever owns an [`ObservableList`] whose listeners need
/// to see the owner.
pub trait ListOwner: Sized {
    fn observable_list(&mut self) -> &mut ObservableList<Self>;
}

/// List widget state: row count, highlight, viewport height and listeners.
pub struct ObservableList<C> {
    state: ListState,
    len: usize,
    viewport_rows: usize,
    listeners: Listeners<C>,
}

impl<C> Default for ObservableList<C> {
    fn default() -> Self {
        Self {
            state: ListState::default(),
            len: 0,
            viewport_rows: 1,
            listeners: Listeners::default(),
        }
    }
}

impl<C> std::fmt::Debug for ObservableList<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableList")
            .field("selected", &self.state.selected())
            .field("len", &self.len)
            .field("viewport_rows", &self.viewport_rows)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<C> ObservableList<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently highlighted row, if any.
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn list_state(&self) -> &ListState {
        &self.state
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Rows visible at once; used by [`Navigation::DownViewport`].
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
    }

    /// New contents of `len` rows. Highlights the first row when non-empty.
    ///
    /// Does not notify listeners; the caller decides what a content change means.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.state = ListState::default();
        if len > 0 {
            self.state.select(Some(0));
        }
    }

    /// Highlight `index` directly (no listener notification).
    pub fn select(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    pub fn add_listener<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&mut C) + 'static,
    {
        self.listeners.add(callback)
    }

    /// Unregister a listener. Called from inside a listener, the removal
    /// takes effect once the current notification finishes.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn apply(&mut self, navigation: Navigation) {
        if self.len == 0 {
            return;
        }
        let last = self.len - 1;
        let current = self.state.selected().unwrap_or(0);
        let target = match navigation {
            Navigation::Up => current.saturating_sub(1),
            Navigation::Down => current.saturating_add(1).min(last),
            Navigation::DownViewport => current.saturating_add(self.viewport_rows).min(last),
        };
        self.state.select(Some(target));
    }
}

/// Apply `navigation` to the owner's list, then notify its listeners in order.
pub fn navigate<C: ListOwner>(owner: &mut C, navigation: Navigation) {
    owner.observable_list().apply(navigation);
    notify(owner);
}

/// Run the owner's list listeners in order, without moving the highlight.
///
/// For key presses on the list whose effect is not a [`Navigation`]
/// (page changes, focus changes, copy).
pub fn notify<C: ListOwner>(owner: &mut C) {
    let mut listeners = owner.observable_list().listeners.detach();
    listeners.notify(owner);
    owner.observable_list().listeners.reattach(listeners);
}

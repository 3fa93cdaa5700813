//! Application state and transitions.
//!
//! `AppState` is the root state type: the query field, the pagination
//! controller, the result list widget and the detail view.
//!
//! # State Machine
//!
//! - **Focus**: Query → Results → Detail → Query (via `cycle_focus`)
//! - **Paging**: see [`PaginationController`]
//! - **Detail**: follows the highlighted result through the listener
//!   registered in [`AppState::new`]; a new page renders its first entry

use crate::model::{Query, RepositorySummary, SearchMode, SelectionError};
use crate::state::detail::{self, DetailView};
use crate::state::observable_list::{ListOwner, Navigation, ObservableList};
use crate::state::pagination::{FetchOutcome, PaginationController};
use crate::state::query_input::QueryInput;
use tracing::debug;

// ===== FocusPane =====

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusPane {
    /// The query field. Printable keys edit the query.
    #[default]
    Query,
    /// The result list. Up/down move the highlight.
    Results,
    /// The detail pane. Up/down scroll it.
    Detail,
}

impl FocusPane {
    /// Next pane in cycle order.
    pub fn next(self) -> Self {
        match self {
            FocusPane::Query => FocusPane::Results,
            FocusPane::Results => FocusPane::Detail,
            FocusPane::Detail => FocusPane::Query,
        }
    }
}

// ===== AppState =====

/// Root UI state.
#[derive(Debug)]
pub struct AppState {
    /// Which pane currently has keyboard focus.
    pub focus: FocusPane,

    /// Query field contents.
    pub query_input: QueryInput,

    /// One-line notice shown in the status bar, cleared on the next fetch.
    pub notice: Option<String>,

    pub(crate) controller: PaginationController,
    pub(crate) results: ObservableList<AppState>,
    pub(crate) detail: DetailView,
}

impl ListOwner for AppState {
    fn observable_list(&mut self) -> &mut ObservableList<Self> {
        &mut self.results
    }
}

impl AppState {
    /// Wrap `controller`, wiring the result list to the detail view.
    pub fn new(controller: PaginationController) -> Self {
        let mut results = ObservableList::new();
        results.add_listener(detail::on_selection_changed);
        Self {
            focus: FocusPane::default(),
            query_input: QueryInput::new(),
            notice: None,
            controller,
            results,
            detail: DetailView::new(),
        }
    }

    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    pub fn results(&self) -> &ObservableList<AppState> {
        &self.results
    }

    /// Mutable access to the result list, for layout (viewport height) and
    /// extra listeners.
    pub fn results_mut(&mut self) -> &mut ObservableList<AppState> {
        &mut self.results
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    pub fn detail_mut(&mut self) -> &mut DetailView {
        &mut self.detail
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Repository behind the highlighted row.
    pub fn selected_repository(&self) -> Result<&RepositorySummary, SelectionError> {
        detail::resolve_selection(self)
    }

    /// Move the result highlight and notify listeners.
    pub fn navigate_results(&mut self, navigation: Navigation) {
        crate::state::observable_list::navigate(self, navigation);
    }

    /// Notify result-list listeners without moving the highlight.
    pub fn notify_results(&mut self) {
        crate::state::observable_list::notify(self);
    }

    /// Search for the text currently in the query field.
    pub fn submit_query(&mut self) -> FetchOutcome {
        let query = Query::new(self.query_input.text());
        self.notice = None;
        let outcome = self.controller.submit_query(query);
        self.apply_outcome(outcome)
    }

    pub fn next_page(&mut self) -> FetchOutcome {
        self.notice = None;
        let outcome = self.controller.next_page();
        self.apply_outcome(outcome)
    }

    pub fn prev_page(&mut self) -> FetchOutcome {
        self.notice = None;
        let outcome = self.controller.prev_page();
        self.apply_outcome(outcome)
    }

    /// Flip between public search and owned repositories.
    pub fn toggle_mode(&mut self) -> FetchOutcome {
        self.notice = None;
        let mode: SearchMode = self.controller.mode().toggled();
        let outcome = self.controller.set_mode(mode);
        self.apply_outcome(outcome)
    }

    /// Reflect a fetch result in the widgets. A replaced page resets the
    /// list and renders its first entry; an unchanged page touches nothing.
    fn apply_outcome(&mut self, outcome: FetchOutcome) -> FetchOutcome {
        if let FetchOutcome::Replaced { len } = outcome {
            self.results.reset(len);
            if let Some(first) = self.controller.buffer().get(0).cloned() {
                self.detail.show(first);
            } else {
                debug!("Page is empty; detail view left as is");
            }
        }
        outcome
    }
}

//! Pagination controller.
//!
//! Owns the active query, the page index and the result buffer. Every
//! navigation fetches synchronously; the caller blocks until the page (or a
//! final error) arrives.
//!
//! # Page index rules
//!
//! - `submit_query`: index := 0, fetch.
//! - `next_page`: index += 1, fetch. An empty page rolls the index back and
//!   leaves the buffer untouched.
//! - `prev_page`: index := max(0, index - 1), fetch.
//! - Any fetch error: if index > 1 the index is decremented, otherwise it is
//!   left as is. The buffer is never touched on error.

use crate::model::{FetchError, PageIndex, PageRequest, Query, RepositorySummary, SearchMode};
use crate::source::{fetch_with_retry, RepositorySource, RetryPolicy, Sleeper, ThreadSleeper};
use crate::state::ResultBuffer;
use tracing::{debug, info, warn};

/// Result of a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The buffer now holds a freshly fetched page of `len` entries.
    Replaced { len: usize },
    /// The buffer and display were left as they were.
    Unchanged,
}

/// Last fetch result, shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A page was loaded.
    Loaded { page: PageIndex, count: usize },
    /// The provider had no entries past the current page.
    EndOfResults,
    /// The last fetch failed; the previous page is still shown.
    Failed { reason: String },
}

/// What to do when a fetch returns an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnEmpty {
    Replace,
    RollBack,
}

/// Paged browsing over a [`RepositorySource`].
pub struct PaginationController {
    source: Box<dyn RepositorySource>,
    retry: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
    mode: SearchMode,
    query: Query,
    page: PageIndex,
    displayed_page: PageIndex,
    buffer: ResultBuffer,
    status: FetchStatus,
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("retry", &self.retry)
            .field("mode", &self.mode)
            .field("query", &self.query)
            .field("page", &self.page)
            .field("displayed_page", &self.displayed_page)
            .field("buffer_len", &self.buffer.len())
            .field("status", &self.status)
            .finish()
    }
}

impl PaginationController {
    /// Create a controller over `source` with the given retry budget.
    pub fn new(source: Box<dyn RepositorySource>, retry: RetryPolicy) -> Self {
        Self {
            source,
            retry,
            sleeper: Box::new(ThreadSleeper),
            mode: SearchMode::default(),
            query: Query::default(),
            page: PageIndex::FIRST,
            displayed_page: PageIndex::FIRST,
            buffer: ResultBuffer::new(),
            status: FetchStatus::Idle,
        }
    }

    /// Replace the backoff sleeper.
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Start in the given mode. Does not fetch.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Index of the page most recently requested.
    pub fn page(&self) -> PageIndex {
        self.page
    }

    /// Index of the page whose entries are in the buffer.
    pub fn displayed_page(&self) -> PageIndex {
        self.displayed_page
    }

    pub fn buffer(&self) -> &ResultBuffer {
        &self.buffer
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// List title, e.g. `Page 3/-`. The total is unknown.
    pub fn page_label(&self) -> String {
        format!("Page {}/-", self.displayed_page.display_number())
    }

    /// Start browsing `query` from the first page.
    pub fn submit_query(&mut self, query: Query) -> FetchOutcome {
        info!(query = %query, mode = ?self.mode, "Query submitted");
        self.query = query;
        self.page = PageIndex::FIRST;
        self.fetch(OnEmpty::Replace)
    }

    /// Advance one page. Rolls back if the provider has nothing there.
    pub fn next_page(&mut self) -> FetchOutcome {
        self.page = self.page.next();
        self.fetch(OnEmpty::RollBack)
    }

    /// Go back one page, clamped at the first. Always refetches.
    pub fn prev_page(&mut self) -> FetchOutcome {
        self.page = self.page.prev();
        self.fetch(OnEmpty::Replace)
    }

    /// Switch browse mode and restart from the first page.
    pub fn set_mode(&mut self, mode: SearchMode) -> FetchOutcome {
        info!(?mode, "Browse mode changed");
        self.mode = mode;
        self.page = PageIndex::FIRST;
        self.fetch(OnEmpty::Replace)
    }

    fn fetch(&mut self, on_empty: OnEmpty) -> FetchOutcome {
        let request = PageRequest::new(self.mode, self.query.clone(), self.page);
        debug!(page = self.page.get(), query = %self.query, "Fetching page");

        match fetch_with_retry(
            self.source.as_ref(),
            &request,
            &self.retry,
            self.sleeper.as_ref(),
        ) {
            Ok(entries) if entries.is_empty() && on_empty == OnEmpty::RollBack => {
                debug!(page = self.page.get(), "Empty page; staying on previous page");
                self.page = self.page.prev();
                self.status = FetchStatus::EndOfResults;
                FetchOutcome::Unchanged
            }
            Ok(entries) => self.install(entries),
            Err(err) => self.recover(err),
        }
    }

    fn install(&mut self, entries: Vec<RepositorySummary>) -> FetchOutcome {
        let len = entries.len();
        self.buffer.replace(entries);
        self.displayed_page = self.page;
        self.status = FetchStatus::Loaded {
            page: self.page,
            count: len,
        };
        debug!(page = self.page.get(), len, "Page installed");
        FetchOutcome::Replaced { len }
    }

    fn recover(&mut self, err: FetchError) -> FetchOutcome {
        warn!(page = self.page.get(), error = %err, "Fetch failed; keeping current page");
        if self.page.get() > 1 {
            self.page = self.page.prev();
        }
        self.status = FetchStatus::Failed {
            reason: err.short_reason(),
        };
        FetchOutcome::Unchanged
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

//! Scripted in-memory repository source.
//!
//! Serves canned pages per query and replays queued failures. Used by the
//! test suites as the data-source double.

use super::RepositorySource;
use crate::model::{FetchError, PageRequest, RepositorySummary, SearchMode};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// Deterministic data source backed by fixed pages.
///
/// Requests past the last page return an empty page, or
/// `FetchError::OutOfRange` when built with [`ScriptedSource::strict_range`].
#[derive(Debug, Default)]
pub struct ScriptedSource {
    search_pages: HashMap<String, Vec<Vec<RepositorySummary>>>,
    owned_pages: Vec<Vec<RepositorySummary>>,
    strict_range: bool,
    failures: RefCell<VecDeque<FetchError>>,
    calls: RefCell<Vec<PageRequest>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `pages` for public searches of `query`.
    pub fn with_pages(mut self, query: &str, pages: Vec<Vec<RepositorySummary>>) -> Self {
        self.search_pages.insert(query.to_string(), pages);
        self
    }

    /// Serve `pages` in owned-repository mode, regardless of query.
    pub fn with_owned_pages(mut self, pages: Vec<Vec<RepositorySummary>>) -> Self {
        self.owned_pages = pages;
        self
    }

    /// Report pages past the end as `OutOfRange` instead of empty.
    pub fn strict_range(mut self) -> Self {
        self.strict_range = true;
        self
    }

    /// Queue a failure; the next request returns it instead of data.
    pub fn fail_next(&self, error: FetchError) {
        self.failures.borrow_mut().push_back(error);
    }

    /// Every request received, in order.
    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.borrow().clone()
    }
}

impl RepositorySource for ScriptedSource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<RepositorySummary>, FetchError> {
        self.calls.borrow_mut().push(request.clone());

        if let Some(error) = self.failures.borrow_mut().pop_front() {
            return Err(error);
        }

        let pages = match request.mode {
            SearchMode::Public => self
                .search_pages
                .get(request.query.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            SearchMode::Owned => self.owned_pages.as_slice(),
        };

        match pages.get(request.page.get() as usize) {
            Some(page) => Ok(page.clone()),
            None if self.strict_range => Err(FetchError::OutOfRange {
                page: request.page.get(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

//! Repository data sources.
//!
//! This module provides the paged repository provider seam:
//! - [`RepositorySource`] trait: one page of repositories per request
//! - GitHub REST implementation (blocking)
//! - Bounded rate-limit retry around any source
//! - A scripted in-memory source for tests and demos

use crate::model::{FetchError, PageRequest, RepositorySummary};
use std::rc::Rc;

pub mod github;
pub mod retry;
pub mod scripted;

pub use github::{GitHubClient, GitHubSettings};
pub use retry::{fetch_with_retry, RetryPolicy, Sleeper, ThreadSleeper};
pub use scripted::ScriptedSource;

/// A paged repository provider.
///
/// Each call requests exactly one page. An empty `Ok` means the provider has
/// no entries at that index; whether a page exists is the provider's call.
///
/// # Errors
///
/// Returns [`FetchError::RateLimited`] for throttling (callers retry),
/// [`FetchError::OutOfRange`] when the provider refuses the page index, and
/// other variants for transport/decoding failures.
pub trait RepositorySource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<RepositorySummary>, FetchError>;
}

impl<S: RepositorySource + ?Sized> RepositorySource for &S {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<RepositorySummary>, FetchError> {
        (**self).fetch_page(request)
    }
}

impl<S: RepositorySource + ?Sized> RepositorySource for Box<S> {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<RepositorySummary>, FetchError> {
        (**self).fetch_page(request)
    }
}

impl<S: RepositorySource + ?Sized> RepositorySource for Rc<S> {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<RepositorySummary>, FetchError> {
        (**self).fetch_page(request)
    }
}

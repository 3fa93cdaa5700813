//! Query, page addressing and browse mode newtypes.

use serde::Deserialize;
use std::fmt;

/// The active search term.
///
/// Immutable once constructed; a new submission replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query(String);

impl Query {
    /// Build a query from user input, kept exactly as submitted.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the query has no searchable characters.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-based page index into a provider's paged result set.
///
/// Never negative by construction. Incrementing is unconditional: whether
/// the page exists is decided by the data source, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageIndex(u32);

impl PageIndex {
    pub const FIRST: PageIndex = PageIndex(0);

    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The following page.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page, clamped at the first page.
    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// 1-based page number as shown to the user.
    pub fn display_number(self) -> u64 {
        u64::from(self.0) + 1
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which paged collection the browser walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Public repository search for the active query.
    #[default]
    #[serde(alias = "search")]
    Public,
    /// Repositories owned by the authenticated user.
    Owned,
}

impl SearchMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            SearchMode::Public => SearchMode::Owned,
            SearchMode::Owned => SearchMode::Public,
        }
    }

    /// Parse a mode name as accepted by config and environment.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "public" | "search" => Some(SearchMode::Public),
            "owned" | "private" | "mine" => Some(SearchMode::Owned),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Public => "search",
            SearchMode::Owned => "owned",
        }
    }
}

/// A single page request handed to the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub mode: SearchMode,
    pub query: Query,
    pub page: PageIndex,
}

impl PageRequest {
    pub fn new(mode: SearchMode, query: Query, page: PageIndex) -> Self {
        Self { mode, query, page }
    }
}

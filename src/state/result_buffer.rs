//! The page currently on screen.

use crate::model::RepositorySummary;

/// Repositories of exactly one fetched page.
///
/// The visible list is derived from this single vector, so row `i` and
/// repository `i` cannot drift apart. The only mutation is a wholesale
/// [`ResultBuffer::replace`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultBuffer {
    entries: Vec<RepositorySummary>,
}

impl ResultBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new page.
    pub fn replace(&mut self, entries: Vec<RepositorySummary>) {
        self.entries = entries;
    }

    pub fn get(&self, index: usize) -> Option<&RepositorySummary> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RepositorySummary] {
        &self.entries
    }

    /// Display label for row `index`, e.g. `0: owner/name`.
    pub fn label(&self, index: usize) -> Option<String> {
        self.entries
            .get(index)
            .map(|repo| format!("{index}: {}", repo.full_name))
    }

    /// All row labels in order.
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, repo)| format!("{i}: {}", repo.full_name))
            .collect()
    }
}

//! Detail view state and the selection → detail synchronizer.

use crate::model::{RepositorySummary, SelectionError};
use crate::state::AppState;
use tracing::debug;

/// The repository shown in the detail pane, plus its scroll offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    repository: Option<RepositorySummary>,
    scroll: u16,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `repository`, scrolled to the top.
    pub fn show(&mut self, repository: RepositorySummary) {
        self.repository = Some(repository);
        self.scroll = 0;
    }

    pub fn repository(&self) -> Option<&RepositorySummary> {
        self.repository.as_ref()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Scroll down one line, never past the last field.
    pub fn scroll_down(&mut self) {
        let max = self
            .repository
            .as_ref()
            .map(|r| r.detail_fields().len().saturating_sub(1))
            .unwrap_or(0);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(1).min(max);
    }

    /// `Label: value` lines for the shown repository; empty when nothing is shown.
    pub fn lines(&self) -> Vec<String> {
        self.repository
            .as_ref()
            .map(|repo| {
                repo.detail_fields()
                    .into_iter()
                    .map(|(label, value)| format!("{label}: {value}"))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Map the highlighted row back to its repository in the current page.
///
/// # Errors
///
/// `NoSelection` when nothing is highlighted, `OutOfRange` when the row has
/// no backing entry (e.g. a stale highlight after the page was replaced).
pub fn resolve_selection(app: &AppState) -> Result<&RepositorySummary, SelectionError> {
    let index = app.results.selected().ok_or(SelectionError::NoSelection)?;
    let buffer = app.controller.buffer();
    buffer.get(index).ok_or(SelectionError::OutOfRange {
        index,
        len: buffer.len(),
    })
}

/// Render the highlighted repository into the detail view.
///
/// On error the detail view is left exactly as it was. Re-selecting the
/// repository already shown keeps its scroll offset.
pub fn sync_detail(app: &mut AppState) -> Result<(), SelectionError> {
    let repository = resolve_selection(app)?;
    if app.detail.repository() == Some(repository) {
        return Ok(());
    }
    let repository = repository.clone();
    app.detail.show(repository);
    Ok(())
}

/// Listener registered on the result list: keeps the detail view in step
/// with the highlight, swallowing resolution errors.
pub fn on_selection_changed(app: &mut AppState) {
    if let Err(err) = sync_detail(app) {
        debug!(error = %err, "Selection not resolvable; keeping previous detail");
    }
}

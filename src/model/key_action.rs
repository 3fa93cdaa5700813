//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that key bindings map onto.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Query field
    /// Submit the query field's text as a new search. Default: Enter (query field)
    SubmitQuery,

    // Focus
    /// Cycle focus: Query → Results → Detail → Query. Default: Tab
    CycleFocus,

    // Pagination
    /// Fetch the following page. Default: l/→
    NextPage,
    /// Fetch the preceding page, clamped at the first. Default: h/←
    PrevPage,

    // Result list navigation (no page change)
    /// Move the highlight up one row. Default: k/↑
    ScrollUp,
    /// Move the highlight down one viewport of rows. Default: j
    ScrollDown,
    /// Move the highlight down one row. Default: ↓
    SelectNext,

    // Actions on the selection
    /// Copy the highlighted repository's URL and exit. Default: x
    CopyUrl,
    /// Switch between public search and owned repositories. Default: m
    ToggleMode,

    // Application
    /// Exit without copying. Default: q/Esc, Ctrl+c anywhere
    Quit,
}

//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod layout;
mod query_box;
mod styles;

pub use layout::{
    calculate_areas, render_layout, results_viewport_rows, status_message, truncate_to_width,
    ScreenAreas,
};
pub use query_box::QueryBox;
pub use styles::{ColorConfig, PaneStyles};

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, KeyAction, SearchMode};
use crate::source::{GitHubClient, GitHubSettings};
use crate::state::{
    dispatch, query_input, AppState, Control, FocusPane, PaginationController, QueryInput,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    clipboard: Box<dyn Clipboard>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, clipboard: Box<dyn Clipboard>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            clipboard,
        })
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Run the event loop until the user quits or copies a URL.
    ///
    /// Returns the copied URL, if any. Blocks on each fetch.
    pub fn run(&mut self) -> Result<Option<String>, TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.handle_key(key) {
                        Control::Continue => {}
                        Control::Quit => return Ok(None),
                        Control::CopiedAndExit(url) => return Ok(Some(url)),
                    }
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    debug!("Handling resize to {}x{}", width, height);
                    self.draw()?;
                }
                _ => {}
            }
        }
    }

    /// Submit the initial query (or load owned repositories) before the
    /// first key press.
    pub fn start(&mut self, initial_query: Option<&str>) -> Result<Control, TuiError> {
        if let Some(query) = initial_query {
            self.app_state.query_input = QueryInput::with_text(query);
        }
        let should_fetch = initial_query.is_some()
            || self.app_state.controller().mode() == SearchMode::Owned;
        if !should_fetch {
            return Ok(Control::Continue);
        }
        self.draw()?;
        Ok(dispatch(
            &mut self.app_state,
            KeyAction::SubmitQuery,
            self.clipboard.as_mut(),
        ))
    }

    /// Handle a single keyboard event.
    ///
    /// Bound keys dispatch an action; unbound keys edit the query when it
    /// has focus and are ignored elsewhere.
    fn handle_key(&mut self, key: KeyEvent) -> Control {
        if let Some(action) = self.key_bindings.resolve(self.app_state.focus, key) {
            debug!(?action, "Key action");
            return dispatch(&mut self.app_state, action, self.clipboard.as_mut());
        }

        if self.app_state.focus == FocusPane::Query {
            self.edit_query(key);
        }
        Control::Continue
    }

    fn edit_query(&mut self, key: KeyEvent) {
        let input = std::mem::take(&mut self.app_state.query_input);
        self.app_state.query_input = match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                query_input::handle_char_input(input, c)
            }
            KeyCode::Backspace => query_input::handle_backspace(input),
            KeyCode::Left => query_input::handle_cursor_left(input),
            KeyCode::Right => query_input::handle_cursor_right(input),
            _ => input,
        };
    }

    /// Render the current frame
    ///
    /// Updates the list's viewport height first so viewport jumps match
    /// what is on screen.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = ratatui::layout::Rect::new(0, 0, size.width.max(1), size.height);
        self.app_state
            .results_mut()
            .set_viewport_rows(layout::results_viewport_rows(frame_area));

        self.terminal.draw(|frame| {
            layout::render_layout(frame, &self.app_state);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            clipboard,
        }
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Build the GitHub-backed state from `config`, run the TUI, and restore
/// the terminal.
///
/// Returns the copied URL, if the session ended with a copy. Logging must
/// be initialized by the caller.
pub fn run(
    config: &ResolvedConfig,
    token: String,
    initial_query: Option<&str>,
) -> Result<Option<String>, TuiError> {
    let client = GitHubClient::new(&GitHubSettings {
        base_url: config.api_base_url.clone(),
        token,
        per_page: config.per_page,
        timeout: config.request_timeout,
    })
    .map_err(AppError::from)?;

    let controller =
        PaginationController::new(Box::new(client), config.retry).with_mode(config.mode);
    let app_state = AppState::new(controller);

    info!(mode = ?config.mode, api = %config.api_base_url, "Starting TUI");
    let mut app = TuiApp::new(app_state, Box::new(SystemClipboard::new()))?;

    // Run the app and ensure cleanup happens even on error
    let result = match app.start(initial_query) {
        Ok(Control::Continue) => app.run(),
        Ok(Control::Quit) => Ok(None),
        Ok(Control::CopiedAndExit(url)) => Ok(Some(url)),
        Err(err) => Err(err),
    };

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

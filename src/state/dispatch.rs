//! Action dispatch: maps [`KeyAction`]s onto state transitions.
//!
//! Stateless. Everything it needs is in [`AppState`] or passed in.

use crate::clipboard::Clipboard;
use crate::model::{KeyAction, SearchMode};
use crate::state::observable_list::Navigation;
use crate::state::{AppState, FocusPane};
use tracing::{debug, info, warn};

/// What the event loop should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Exit without copying anything.
    Quit,
    /// The URL was copied; exit and report it.
    CopiedAndExit(String),
}

/// Apply `action` to `app`.
///
/// An action handled while the result list has focus notifies the list's
/// listeners after its own effect. Highlight moves notify through
/// [`navigate`](crate::state::navigate); every other action notifies here.
pub fn dispatch(app: &mut AppState, action: KeyAction, clipboard: &mut dyn Clipboard) -> Control {
    let on_results = app.focus == FocusPane::Results;
    let control = apply(app, action, clipboard);
    if on_results && !moves_highlight(action) {
        app.notify_results();
    }
    control
}

fn moves_highlight(action: KeyAction) -> bool {
    matches!(
        action,
        KeyAction::ScrollUp | KeyAction::ScrollDown | KeyAction::SelectNext
    )
}

fn apply(app: &mut AppState, action: KeyAction, clipboard: &mut dyn Clipboard) -> Control {
    match action {
        KeyAction::SubmitQuery => {
            submit(app);
            Control::Continue
        }
        KeyAction::CycleFocus => {
            app.cycle_focus();
            Control::Continue
        }
        KeyAction::NextPage => {
            app.next_page();
            Control::Continue
        }
        KeyAction::PrevPage => {
            app.prev_page();
            Control::Continue
        }
        KeyAction::ScrollUp => {
            if app.focus == FocusPane::Detail {
                app.detail_mut().scroll_up();
            } else {
                app.navigate_results(Navigation::Up);
            }
            Control::Continue
        }
        KeyAction::ScrollDown => {
            if app.focus == FocusPane::Detail {
                app.detail_mut().scroll_down();
            } else {
                app.navigate_results(Navigation::DownViewport);
            }
            Control::Continue
        }
        KeyAction::SelectNext => {
            if app.focus == FocusPane::Detail {
                app.detail_mut().scroll_down();
            } else {
                app.navigate_results(Navigation::Down);
            }
            Control::Continue
        }
        KeyAction::CopyUrl => copy_selected_url(app, clipboard),
        KeyAction::ToggleMode => {
            app.toggle_mode();
            Control::Continue
        }
        KeyAction::Quit => Control::Quit,
    }
}

fn submit(app: &mut AppState) {
    if app.controller().mode() == SearchMode::Public && app.query_input.text().trim().is_empty() {
        debug!("Blank query ignored");
        return;
    }
    app.submit_query();
    app.focus = FocusPane::Results;
}

fn copy_selected_url(app: &mut AppState, clipboard: &mut dyn Clipboard) -> Control {
    let url = match app.selected_repository() {
        Ok(repository) => repository.html_url.clone(),
        Err(err) => {
            debug!(error = %err, "Nothing to copy");
            app.notice = Some("Nothing selected".to_string());
            return Control::Continue;
        }
    };

    match clipboard.set_text(&url) {
        Ok(()) => {
            info!(url = %url, "Copied repository URL");
            Control::CopiedAndExit(url)
        }
        Err(err) => {
            warn!(error = %err, "Copy failed");
            app.notice = Some(format!("Copy failed: {}", err.0));
            Control::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::model::RepositorySummary;
    use crate::source::{RetryPolicy, ScriptedSource};
    use crate::state::{PaginationController, QueryInput};
    use std::rc::Rc;

    fn repo(name: &str) -> RepositorySummary {
        RepositorySummary::new(name, format!("https://github.com/{name}"))
    }

    fn app_with(source: &Rc<ScriptedSource>) -> AppState {
        AppState::new(PaginationController::new(
            Box::new(Rc::clone(source)),
            RetryPolicy::immediate(2),
        ))
    }

    fn loaded_app(names: &[&str]) -> (AppState, Rc<ScriptedSource>) {
        let page = names.iter().map(|n| repo(n)).collect();
        let source = Rc::new(ScriptedSource::new().with_pages("q", vec![page]));
        let mut app = app_with(&source);
        app.query_input = QueryInput::with_text("q");
        let mut clipboard = MemoryClipboard::new();
        dispatch(&mut app, KeyAction::SubmitQuery, &mut clipboard);
        (app, source)
    }

    #[test]
    fn blank_query_is_not_submitted() {
        let source = Rc::new(ScriptedSource::new());
        let mut app = app_with(&source);
        app.query_input = QueryInput::with_text("   ");

        let control = dispatch(&mut app, KeyAction::SubmitQuery, &mut MemoryClipboard::new());

        assert_eq!(control, Control::Continue);
        assert!(source.calls().is_empty());
        assert_eq!(app.focus, FocusPane::Query);
    }

    #[test]
    fn submitted_query_reaches_source_unchanged() {
        let source = Rc::new(ScriptedSource::new());
        let mut app = app_with(&source);
        app.query_input = QueryInput::with_text(" raft  consensus ");

        dispatch(&mut app, KeyAction::SubmitQuery, &mut MemoryClipboard::new());

        let calls = source.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query.as_str(), " raft  consensus ");
    }

    #[test]
    fn submit_moves_focus_to_results() {
        let (app, source) = loaded_app(&["a/a"]);
        assert_eq!(app.focus, FocusPane::Results);
        assert_eq!(source.calls().len(), 1);
    }

    #[test]
    fn copy_returns_url_of_highlighted_entry() {
        let (mut app, _) = loaded_app(&["a/a", "b/b", "c/c"]);
        let mut clipboard = MemoryClipboard::new();
        dispatch(&mut app, KeyAction::SelectNext, &mut clipboard);

        let control = dispatch(&mut app, KeyAction::CopyUrl, &mut clipboard);

        assert_eq!(
            control,
            Control::CopiedAndExit("https://github.com/b/b".to_string())
        );
        assert_eq!(clipboard.copied(), ["https://github.com/b/b"]);
    }

    #[test]
    fn copy_with_nothing_selected_continues() {
        let source = Rc::new(ScriptedSource::new());
        let mut app = app_with(&source);
        let mut clipboard = MemoryClipboard::new();

        let control = dispatch(&mut app, KeyAction::CopyUrl, &mut clipboard);

        assert_eq!(control, Control::Continue);
        assert!(clipboard.copied().is_empty());
        assert_eq!(app.notice.as_deref(), Some("Nothing selected"));
    }

    #[test]
    fn clipboard_failure_keeps_session_running() {
        let (mut app, _) = loaded_app(&["a/a"]);
        let mut clipboard = MemoryClipboard::unavailable();

        let control = dispatch(&mut app, KeyAction::CopyUrl, &mut clipboard);

        assert_eq!(control, Control::Continue);
        assert!(app.notice.as_deref().is_some_and(|n| n.starts_with("Copy failed")));
    }

    #[test]
    fn scroll_keys_follow_focus() {
        let (mut app, _) = loaded_app(&["a/a", "b/b"]);
        let mut clipboard = MemoryClipboard::new();

        dispatch(&mut app, KeyAction::SelectNext, &mut clipboard);
        assert_eq!(app.results().selected(), Some(1));

        app.focus = FocusPane::Detail;
        dispatch(&mut app, KeyAction::SelectNext, &mut clipboard);
        assert_eq!(app.results().selected(), Some(1));
        assert_eq!(app.detail().scroll(), 1);

        dispatch(&mut app, KeyAction::ScrollUp, &mut clipboard);
        assert_eq!(app.detail().scroll(), 0);
    }

    #[test]
    fn page_and_focus_keys_on_result_list_notify_listeners() {
        let source = Rc::new(
            ScriptedSource::new().with_pages("q", vec![vec![repo("a/a")], vec![repo("b/b")]]),
        );
        let mut app = app_with(&source);
        app.query_input = QueryInput::with_text("q");
        let mut clipboard = MemoryClipboard::new();
        dispatch(&mut app, KeyAction::SubmitQuery, &mut clipboard);

        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        app.results_mut().add_listener(move |app: &mut AppState| {
            let name = app.selected_repository().map(|r| r.full_name.clone()).ok();
            log.borrow_mut().push(name);
        });

        dispatch(&mut app, KeyAction::NextPage, &mut clipboard);
        dispatch(&mut app, KeyAction::CycleFocus, &mut clipboard);

        assert_eq!(
            *seen.borrow(),
            vec![Some("b/b".to_string()), Some("b/b".to_string())]
        );
        assert_eq!(app.focus, FocusPane::Detail);
    }

    #[test]
    fn highlight_moves_notify_once() {
        let (mut app, _) = loaded_app(&["a/a", "b/b"]);
        let count = Rc::new(std::cell::Cell::new(0));
        let counter = Rc::clone(&count);
        app.results_mut()
            .add_listener(move |_: &mut AppState| counter.set(counter.get() + 1));

        dispatch(&mut app, KeyAction::SelectNext, &mut MemoryClipboard::new());

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn keys_in_other_panes_do_not_notify() {
        let (mut app, _) = loaded_app(&["a/a", "b/b"]);
        let count = Rc::new(std::cell::Cell::new(0));
        let counter = Rc::clone(&count);
        app.results_mut()
            .add_listener(move |_: &mut AppState| counter.set(counter.get() + 1));
        app.focus = FocusPane::Detail;

        dispatch(&mut app, KeyAction::ScrollUp, &mut MemoryClipboard::new());
        dispatch(&mut app, KeyAction::CycleFocus, &mut MemoryClipboard::new());

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn quit_stops_without_copying() {
        let (mut app, _) = loaded_app(&["a/a"]);
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(dispatch(&mut app, KeyAction::Quit, &mut clipboard), Control::Quit);
        assert!(clipboard.copied().is_empty());
    }
}

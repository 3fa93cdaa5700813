//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::state::FocusPane;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions, per focused pane.
///
/// Global bindings apply in every pane and are checked first. Keys with no
/// binding in the query pane are left to text editing by the caller.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    global: HashMap<KeyEvent, KeyAction>,
    per_pane: HashMap<(FocusPane, KeyEvent), KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event in the given pane.
    pub fn resolve(&self, focus: FocusPane, key: KeyEvent) -> Option<KeyAction> {
        // Ignore kind/state so repeat events and terminals reporting extra
        // state bits still match.
        let key = KeyEvent::new(key.code, key.modifiers);
        self.global
            .get(&key)
            .or_else(|| self.per_pane.get(&(focus, key)))
            .copied()
    }

    fn bind(&mut self, focus: FocusPane, code: KeyCode, action: KeyAction) {
        self.per_pane
            .insert((focus, KeyEvent::new(code, KeyModifiers::NONE)), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            global: HashMap::new(),
            per_pane: HashMap::new(),
        };

        // Application controls
        bindings.global.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        // Focus switching
        for pane in [FocusPane::Query, FocusPane::Results, FocusPane::Detail] {
            bindings.bind(pane, KeyCode::Tab, KeyAction::CycleFocus);
        }

        // Query field
        bindings.bind(FocusPane::Query, KeyCode::Enter, KeyAction::SubmitQuery);

        // Result list: pages
        let results = FocusPane::Results;
        bindings.bind(results, KeyCode::Right, KeyAction::NextPage);
        bindings.bind(results, KeyCode::Char('l'), KeyAction::NextPage);
        bindings.bind(results, KeyCode::Left, KeyAction::PrevPage);
        bindings.bind(results, KeyCode::Char('h'), KeyAction::PrevPage);

        // Result list: highlight
        bindings.bind(results, KeyCode::Char('k'), KeyAction::ScrollUp);
        bindings.bind(results, KeyCode::Up, KeyAction::ScrollUp);
        bindings.bind(results, KeyCode::Char('j'), KeyAction::ScrollDown);
        bindings.bind(results, KeyCode::Down, KeyAction::SelectNext);

        // Result list: actions
        bindings.bind(results, KeyCode::Char('x'), KeyAction::CopyUrl);
        bindings.bind(results, KeyCode::Char('m'), KeyAction::ToggleMode);

        // Detail view scrolling
        let detail = FocusPane::Detail;
        bindings.bind(detail, KeyCode::Char('k'), KeyAction::ScrollUp);
        bindings.bind(detail, KeyCode::Up, KeyAction::ScrollUp);
        bindings.bind(detail, KeyCode::Char('j'), KeyAction::SelectNext);
        bindings.bind(detail, KeyCode::Down, KeyAction::SelectNext);

        for pane in [results, detail] {
            bindings.bind(pane, KeyCode::Char('q'), KeyAction::Quit);
            bindings.bind(pane, KeyCode::Esc, KeyAction::Quit);
        }

        bindings
    }
}

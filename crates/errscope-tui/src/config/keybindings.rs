use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    LogViewer,
    FilterInput,
    Popup,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::new(KeyCode::Esc), Action::GoBack);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        bindings.insert(KeyContext::Global, global);

        // Log viewer bindings
        let mut log_viewer = HashMap::new();
        // Row selection
        log_viewer.insert(KeyBinding::new(KeyCode::Char('j')), Action::SelectDown);
        log_viewer.insert(KeyBinding::new(KeyCode::Down), Action::SelectDown);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('k')), Action::SelectUp);
        log_viewer.insert(KeyBinding::new(KeyCode::Up), Action::SelectUp);
        log_viewer.insert(KeyBinding::new(KeyCode::Home), Action::SelectFirst);
        log_viewer.insert(KeyBinding::new(KeyCode::End), Action::SelectLast);
        log_viewer.insert(KeyBinding::new(KeyCode::Enter), Action::ToggleDetail);
        // Pages (less-style where it fits)
        log_viewer.insert(KeyBinding::new(KeyCode::Char('n')), Action::NextPage);
        log_viewer.insert(KeyBinding::new(KeyCode::Right), Action::NextPage);
        log_viewer.insert(KeyBinding::new(KeyCode::PageDown), Action::NextPage);
        log_viewer.insert(KeyBinding::ctrl(KeyCode::Char('f')), Action::NextPage);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('p')), Action::PrevPage);
        log_viewer.insert(KeyBinding::new(KeyCode::Left), Action::PrevPage);
        log_viewer.insert(KeyBinding::new(KeyCode::PageUp), Action::PrevPage);
        log_viewer.insert(KeyBinding::ctrl(KeyCode::Char('b')), Action::PrevPage);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('g')), Action::FirstPage);
        log_viewer.insert(KeyBinding::shift(KeyCode::Char('G')), Action::LastPage);
        // Filters
        log_viewer.insert(KeyBinding::new(KeyCode::Char('/')), Action::OpenFilter);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('t')), Action::CycleErrorType);
        log_viewer.insert(KeyBinding::shift(KeyCode::Char('T')), Action::CycleErrorTypeBack);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('x')), Action::ClearFilters);
        // Data and display
        log_viewer.insert(KeyBinding::new(KeyCode::Char('r')), Action::Reload);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('s')), Action::ToggleStats);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('e')), Action::ExportMatches);
        bindings.insert(KeyContext::LogViewer, log_viewer);

        // Filter input bindings (when the form is active)
        let mut filter_input = HashMap::new();
        filter_input.insert(KeyBinding::new(KeyCode::Enter), Action::ApplyFilter);
        filter_input.insert(KeyBinding::new(KeyCode::Esc), Action::CloseFilter);
        filter_input.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::CloseFilter);
        filter_input.insert(KeyBinding::new(KeyCode::Backspace), Action::FilterBackspace);
        filter_input.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::FilterClearField);
        filter_input.insert(KeyBinding::new(KeyCode::Tab), Action::FilterNextField);
        filter_input.insert(KeyBinding::new(KeyCode::Down), Action::FilterNextField);
        filter_input.insert(KeyBinding::shift(KeyCode::BackTab), Action::FilterPrevField);
        filter_input.insert(KeyBinding::new(KeyCode::BackTab), Action::FilterPrevField);
        filter_input.insert(KeyBinding::new(KeyCode::Up), Action::FilterPrevField);
        bindings.insert(KeyContext::FilterInput, filter_input);

        // Popup bindings (detail view and help)
        let mut popup = HashMap::new();
        popup.insert(KeyBinding::new(KeyCode::Esc), Action::GoBack);
        popup.insert(KeyBinding::new(KeyCode::Enter), Action::GoBack);
        popup.insert(KeyBinding::new(KeyCode::Char('q')), Action::GoBack);
        popup.insert(KeyBinding::new(KeyCode::Char('?')), Action::GoBack);
        popup.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(KeyContext::Popup, popup);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        // First check context-specific bindings
        if let Some(action) = self.bindings.get(&context).and_then(|b| b.get(&binding)) {
            return Some(action.clone());
        }

        // Popups swallow everything else
        if context == KeyContext::Popup {
            return None;
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }

    /// Handle key event in filter input mode
    /// Returns Some(Action) for special keys, FilterInput for regular characters
    pub fn get_filter_input_action(&self, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(action) = self
            .bindings
            .get(&KeyContext::FilterInput)
            .and_then(|b| b.get(&binding))
        {
            return Some(action.clone());
        }

        if let KeyCode::Char(c) = key.code {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                return Some(Action::FilterInput(c));
            }
        }

        None
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

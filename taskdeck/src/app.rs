//! Terminal interaction state and key handling.
//!
//! [`App`] holds only what the terminal needs on top of the view state:
//! which field has focus, which row is selected, and whether to quit. Key
//! presses are translated into controller [`Command`]s; the view state itself
//! is only ever read here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use crate::controller::{Command, DraftEdit, ViewState};

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Form title input (default).
    Title,
    /// Form priority selector.
    Priority,
    /// Form description input.
    Description,
    /// Task list.
    List,
}

impl PanelFocus {
    /// Whether this focus is one of the form fields.
    #[must_use]
    pub const fn is_form(self) -> bool {
        !matches!(self, Self::List)
    }
}

/// Terminal-side application state.
#[derive(Debug, Clone)]
pub struct App {
    /// Focused area.
    pub focus: PanelFocus,
    /// Index of the highlighted task row.
    pub selected: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// chrono format used for task timestamps.
    pub timestamp_format: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application focused on the title field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            focus: PanelFocus::Title,
            selected: 0,
            should_quit: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Use a custom timestamp format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Selected row clamped to the current list length.
    #[must_use]
    pub fn selected_index(&self, state: &ViewState) -> Option<usize> {
        if state.tasks.is_empty() {
            None
        } else {
            Some(self.selected.min(state.tasks.len() - 1))
        }
    }

    /// Handle a key event, returning the command it maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, state: &ViewState) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        // The delete prompt captures every other key.
        if state.pending_delete.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Command::ConfirmDelete),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Command::DismissDelete),
                _ => None,
            };
        }

        match key.code {
            KeyCode::BackTab => {
                self.cycle_focus_backward();
                return None;
            }
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.cycle_focus_backward();
                return None;
            }
            KeyCode::Tab => {
                self.cycle_focus_forward();
                return None;
            }
            KeyCode::Esc if state.is_editing() => {
                self.focus = PanelFocus::Title;
                return Some(Command::CancelEdit);
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Title => Self::handle_text_key(key, &state.draft.title, DraftEdit::Title),
            PanelFocus::Description => {
                Self::handle_text_key(key, &state.draft.description, DraftEdit::Description)
            }
            PanelFocus::Priority => Self::handle_priority_key(key, state),
            PanelFocus::List => self.handle_list_key(key, state),
        }
    }

    /// Handle a key while a text field is focused.
    fn handle_text_key(
        key: KeyEvent,
        current: &str,
        edit: fn(String) -> DraftEdit,
    ) -> Option<Command> {
        match key.code {
            KeyCode::Enter => Some(Command::Submit),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut text = current.to_string();
                text.push(c);
                Some(Command::EditDraft(edit(text)))
            }
            KeyCode::Backspace => {
                let mut text = current.to_string();
                text.pop()?;
                Some(Command::EditDraft(edit(text)))
            }
            _ => None,
        }
    }

    /// Handle a key while the priority selector is focused.
    fn handle_priority_key(key: KeyEvent, state: &ViewState) -> Option<Command> {
        let current = state.draft.priority;
        let next = match key.code {
            KeyCode::Enter => return Some(Command::Submit),
            KeyCode::Right | KeyCode::Char(' ' | 'l') => current.next(),
            KeyCode::Left | KeyCode::Char('h') => current.prev(),
            _ => return None,
        };
        Some(Command::EditDraft(DraftEdit::Priority(next)))
    }

    /// Handle a key while the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent, state: &ViewState) -> Option<Command> {
        let selected_id = self
            .selected_index(state)
            .map(|idx| state.tasks[idx].id.clone());

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected_index(state).unwrap_or(0).saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(idx) = self.selected_index(state) {
                    self.selected = (idx + 1).min(state.tasks.len() - 1);
                }
                None
            }
            KeyCode::Char(' ' | 'x') | KeyCode::Enter => selected_id.map(Command::Toggle),
            KeyCode::Char('e') => {
                let id = selected_id?;
                self.focus = PanelFocus::Title;
                Some(Command::StartEdit(id))
            }
            KeyCode::Char('d') | KeyCode::Delete => selected_id.map(Command::RequestDelete),
            KeyCode::Char('f') => Some(Command::ChangeFilter(state.filter.next())),
            KeyCode::Char('s') => Some(Command::ChangeSort(state.sort.next())),
            KeyCode::Char('r') => Some(Command::Refresh),
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            _ => None,
        }
    }

    /// Cycle focus forward: Title -> Priority -> Description -> List -> Title.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Title => PanelFocus::Priority,
            PanelFocus::Priority => PanelFocus::Description,
            PanelFocus::Description => PanelFocus::List,
            PanelFocus::List => PanelFocus::Title,
        };
    }

    /// Cycle focus backward: Title -> List -> Description -> Priority -> Title.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Title => PanelFocus::List,
            PanelFocus::List => PanelFocus::Description,
            PanelFocus::Description => PanelFocus::Priority,
            PanelFocus::Priority => PanelFocus::Title,
        };
    }
}

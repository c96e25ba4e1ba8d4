//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::controller::ViewState;

/// Confirmation prompt shown while a delete is pending.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task? (y/n)";

/// Key help for the focused area.
#[must_use]
pub const fn help_text(focus: PanelFocus, editing: bool) -> &'static str {
    match focus {
        PanelFocus::Title | PanelFocus::Description if editing => {
            "Enter: update | Esc: cancel | Tab: next field | Ctrl-C: quit"
        }
        PanelFocus::Title | PanelFocus::Description => {
            "Enter: add | Tab: next field | Ctrl-C: quit"
        }
        PanelFocus::Priority => "←→: change priority | Enter: submit | Tab: next field",
        PanelFocus::List => {
            "↑↓/jk: navigate | Space: toggle | e: edit | d: delete | f: filter | s: sort | r: refresh | q: quit"
        }
    }
}

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App, state: &ViewState) {
    let mut spans = vec![
        Span::styled("TaskDeck", theme::bold()),
        Span::raw(" | "),
    ];

    if state.pending_delete.is_some() {
        spans.push(Span::styled(DELETE_PROMPT, theme::error_banner()));
    } else {
        if state.loading {
            spans.push(Span::styled("●", theme::normal().fg(theme::PRIORITY_MEDIUM)));
            spans.push(Span::raw(" Syncing | "));
        }
        spans.push(Span::styled(
            help_text(app.focus, state.is_editing()),
            theme::dimmed(),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

//! Task form rendering: title, priority, description and submit hints.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::controller::ViewState;

/// Placeholder shown in an empty title field.
pub const TITLE_PLACEHOLDER: &str = "Task title";
/// Placeholder shown in an empty description field.
pub const DESCRIPTION_PLACEHOLDER: &str = "Task description (optional)";

const LABEL_WIDTH: usize = 13;

/// Render the form panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App, state: &ViewState) {
    let draft = &state.draft;
    let editing = state.is_editing();

    let lines = vec![
        text_line(
            "Title",
            &draft.title,
            TITLE_PLACEHOLDER,
            app.focus == PanelFocus::Title,
        ),
        priority_line(app, state),
        text_line(
            "Description",
            &draft.description,
            DESCRIPTION_PLACEHOLDER,
            app.focus == PanelFocus::Description,
        ),
        actions_line(editing),
    ];

    let title = if editing { "Edit Task" } else { "Add New Task" };
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::FORM_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::border(app.focus.is_form()));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the error banner. Callers skip this when there is no error.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::error_banner());
    let paragraph = Paragraph::new(Span::styled(message.to_string(), theme::error_banner()))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn label(name: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    Span::styled(format!("{:<LABEL_WIDTH$}", format!("{name}:")), style)
}

fn text_line<'a>(name: &str, value: &'a str, placeholder: &'a str, focused: bool) -> Line<'a> {
    let mut spans = vec![label(name, focused)];
    if value.is_empty() {
        if focused {
            spans.push(Span::styled("█", theme::highlighted()));
        }
        spans.push(Span::styled(placeholder, theme::dimmed()));
    } else {
        spans.push(Span::styled(value, theme::normal()));
        if focused {
            spans.push(Span::styled("█", theme::highlighted()));
        }
    }
    Line::from(spans)
}

fn priority_line(app: &App, state: &ViewState) -> Line<'static> {
    let priority = state.draft.priority;
    let focused = app.focus == PanelFocus::Priority;
    let arrow = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    Line::from(vec![
        label("Priority", focused),
        Span::styled("◀ ", arrow),
        Span::styled(
            priority.label(),
            theme::normal().fg(theme::priority_color(priority)),
        ),
        Span::styled(" ▶", arrow),
    ])
}

fn actions_line(editing: bool) -> Line<'static> {
    let submit = if editing { "Update Task" } else { "Add Task" };
    let mut spans = vec![
        Span::styled("[Enter] ", theme::dimmed()),
        Span::styled(submit, theme::bold()),
    ];
    if editing {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("[Esc] ", theme::dimmed()));
        spans.push(Span::styled("Cancel", theme::normal()));
    }
    Line::from(spans)
}

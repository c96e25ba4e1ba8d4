//! Task list rendering, plus the filter/sort selector line above it.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use taskdeck_proto::query::Filter;
use taskdeck_proto::task::Task;

use super::theme;
use crate::app::{App, PanelFocus};
use crate::controller::ViewState;

/// Shown in place of the rows while a list fetch is in flight.
pub const LOADING: &str = "Loading tasks...";
/// Shown when the unfiltered list is empty.
pub const EMPTY_ALL: &str = "No tasks yet. Create your first task!";

/// Message for an empty list under `filter`.
#[must_use]
pub fn empty_message(filter: Filter) -> String {
    match filter {
        Filter::All => EMPTY_ALL.to_string(),
        other => format!("No {} tasks found.", other.as_str()),
    }
}

/// Formats a timestamp in local time. Falls back to RFC 3339 when the
/// configured format is not a valid chrono format string.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.with_timezone(&Local).format(format)).is_err() {
        return ts.to_rfc3339();
    }
    out
}

/// Render the filter and sort selectors.
pub fn render_controls(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = Line::from(vec![
        Span::styled(" Filter: ", theme::dimmed()),
        Span::styled(state.filter.label(), theme::bold()),
        Span::raw("   "),
        Span::styled("Sort by: ", theme::dimmed()),
        Span::styled(state.sort.label(), theme::bold()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the task list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App, state: &ViewState) {
    let focused = app.focus == PanelFocus::List;
    let block = Block::default()
        .title(Span::styled(
            format!("Tasks ({})", state.tasks.len()),
            theme::panel_title(theme::TASKS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(focused));

    // The loading placeholder replaces the rows until the fetch resolves.
    if state.loading || state.tasks.is_empty() {
        let message = if state.loading {
            LOADING.to_string()
        } else {
            empty_message(state.filter)
        };
        let paragraph = Paragraph::new(Span::styled(message, theme::dimmed()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .tasks
        .iter()
        .map(|task| ListItem::new(task_text(task, &app.timestamp_format)))
        .collect();

    let mut list = List::new(items).block(block);
    let mut list_state = ListState::default();
    if focused {
        list = list.highlight_style(theme::selected()).highlight_symbol("> ");
        list_state = list_state.with_selected(app.selected_index(state));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn task_text<'a>(task: &'a Task, timestamp_format: &str) -> Text<'a> {
    let (glyph, glyph_style, title_style) = if task.completed {
        (
            "✓",
            theme::normal().fg(theme::SUCCESS),
            theme::completed_title(),
        )
    } else {
        ("○", theme::dimmed(), theme::bold())
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(glyph, glyph_style),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", task.priority.as_str()),
            theme::priority_badge(task.priority),
        ),
    ])];

    if let Some(description) = task.description_text() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(description, theme::normal()),
        ]));
    }

    let mut meta = format!(
        "  Created: {}",
        format_timestamp(task.created_at, timestamp_format)
    );
    if task.was_updated() {
        meta.push_str(&format!(
            "  Updated: {}",
            format_timestamp(task.updated_at, timestamp_format)
        ));
    }
    lines.push(Line::styled(meta, theme::dimmed()));

    Text::from(lines)
}

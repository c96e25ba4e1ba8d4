//! Header with aggregate task counts.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::controller::ViewState;

/// Render the header: app title plus total / completed / pending counts.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let stats = state.stats;
    let line = Line::from(vec![
        Span::styled("Total ", theme::dimmed()),
        Span::styled(stats.total.to_string(), theme::bold()),
        Span::raw("   "),
        Span::styled("Completed ", theme::dimmed()),
        Span::styled(stats.completed.to_string(), theme::normal().fg(theme::SUCCESS)),
        Span::raw("   "),
        Span::styled("Pending ", theme::dimmed()),
        Span::styled(
            stats.pending.to_string(),
            theme::normal().fg(theme::PRIORITY_MEDIUM),
        ),
    ]);

    let block = Block::default()
        .title(Span::styled(
            "Task Manager",
            theme::panel_title(theme::HEADER_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

//! Terminal UI rendering.

pub mod form;
pub mod header;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;
use crate::controller::ViewState;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App, state: &ViewState) {
    let error_height = if state.error.is_empty() { 0 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(error_height), // Error banner
            Constraint::Length(6),            // Form
            Constraint::Length(1),            // Filter / sort
            Constraint::Min(3),               // Task list
            Constraint::Length(1),            // Status bar
        ])
        .split(frame.area());

    header::render(frame, chunks[0], state);
    if !state.error.is_empty() {
        form::render_error(frame, chunks[1], &state.error);
    }
    form::render(frame, chunks[2], app, state);
    task_list::render_controls(frame, chunks[3], state);
    task_list::render(frame, chunks[4], app, state);
    status_bar::render(frame, chunks[5], app, state);
}

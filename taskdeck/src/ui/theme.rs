//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use taskdeck_proto::task::Priority;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success/completed indicator color.
pub const SUCCESS: Color = Color::Green;

/// Error banner color.
pub const ERROR: Color = Color::Red;

/// High priority badge color.
pub const PRIORITY_HIGH: Color = Color::Rgb(0xff, 0x47, 0x57);

/// Medium priority badge color.
pub const PRIORITY_MEDIUM: Color = Color::Rgb(0xff, 0xa5, 0x02);

/// Low priority badge color.
pub const PRIORITY_LOW: Color = Color::Rgb(0x26, 0xde, 0x81);

/// Panel title color for the header.
pub const HEADER_TITLE: Color = Color::Cyan;

/// Panel title color for the form.
pub const FORM_TITLE: Color = Color::Blue;

/// Panel title color for the task list.
pub const TASKS_TITLE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (timestamps, placeholders).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders and fields).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Title style for completed tasks.
#[must_use]
pub fn completed_title() -> Style {
    dimmed().add_modifier(Modifier::CROSSED_OUT)
}

/// Error banner style.
#[must_use]
pub fn error_banner() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

/// Badge color for a priority.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => PRIORITY_HIGH,
        Priority::Medium => PRIORITY_MEDIUM,
        Priority::Low => PRIORITY_LOW,
    }
}

/// Badge style for a priority (dark text on the priority color).
#[must_use]
pub fn priority_badge(priority: Priority) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(priority_color(priority))
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Border style depending on focus.
#[must_use]
pub fn border(focused: bool) -> Style {
    if focused { highlighted() } else { normal() }
}

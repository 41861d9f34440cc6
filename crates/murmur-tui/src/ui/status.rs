//! Status bar
//!
//! Displays the connection phase and transcript size. The phase is
//! informational only - connection loss is never surfaced as an error.

use murmur_app::{App, ConnectionIndicator};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let phase = match app.connection_indicator() {
        ConnectionIndicator::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionIndicator::Connected => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionIndicator::Disconnected { intentional: true } => {
            Span::styled("Disconnected (closed by server)", Style::default().fg(Color::Red))
        },
        ConnectionIndicator::Disconnected { intentional: false } => {
            Span::styled("Disconnected (retrying)", Style::default().fg(Color::Red))
        },
    };

    let count = app.transcript().len();
    let info = Span::styled(
        format!(" | Messages: {count}"),
        Style::default().fg(Color::Gray),
    );

    let status_line = Line::from(vec![Span::raw(" "), phase, info]);
    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

//! Message list
//!
//! Displays the transcript, bottom-anchored, honoring the scroll offset.
//! Join notices get the positive treatment, departure notices the negative
//! one, and chat messages the standard treatment with a sender label. Every
//! entry carries its time-of-day label.

use murmur_app::{App, Entry, EntryKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render the message list.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Messages ");

    let entries = app.transcript();
    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;

    // Window anchored `scroll_offset` entries above the bottom edge.
    let end = entries.len().saturating_sub(app.scroll_offset());
    let start = end.saturating_sub(visible_height);

    let items: Vec<ListItem> = entries[start..end].iter().map(entry_item).collect();
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}

fn entry_item(entry: &Entry) -> ListItem<'static> {
    let time = Span::styled(
        format!("  {}", entry.time_label),
        Style::default().fg(Color::DarkGray),
    );

    let line = match &entry.kind {
        EntryKind::Chat { sender } => Line::from(vec![
            Span::styled(
                format!("<{sender}>"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(entry.text.clone()),
            time,
        ]),
        EntryKind::Joined => Line::from(vec![
            Span::styled(entry.text.clone(), Style::default().fg(Color::Green)),
            time,
        ]),
        EntryKind::Left => Line::from(vec![
            Span::styled(entry.text.clone(), Style::default().fg(Color::Red)),
            time,
        ]),
    };

    ListItem::new(line)
}

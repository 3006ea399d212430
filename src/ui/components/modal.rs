//! Modal overlay helpers.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::theme::theme;

/// Calculate a centered rectangle within the given area.
///
/// The size is clamped to the area.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Clear a centered dialog area, draw its titled border, and return the inner area.
pub fn render_modal_frame(frame: &mut Frame, area: Rect, width: u16, height: u16, title: &str) -> Rect {
    let t = theme();
    let dialog_area = centered_rect(area, width, height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.accent));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    inner
}

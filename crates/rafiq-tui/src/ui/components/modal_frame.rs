//! Centered modal chrome shared by every overlay.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear};
use ratatui::Frame;

use rafiq_core::models::AppTheme;

use crate::ui::theme;

/// A centered rect of at most `width` x `height`, clamped to the frame.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Clear the region and draw the modal border. Returns the inner area.
pub fn draw(f: &mut Frame, area: Rect, title: &str, app_theme: AppTheme) -> Rect {
    let accent = theme::accent(app_theme);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent.primary))
        .title(format!(" {title} "))
        .title_style(theme::title_style(app_theme))
        .style(Style::default().bg(theme::BG_CARD));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    inner
}

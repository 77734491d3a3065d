//! The navigation dock: a vertical bar of the visible destinations, in dock
//! order, drawn at the user's saved offset. Its width follows the configured
//! size.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use rafiq_core::models::NavSize;

use crate::ui::theme;
use crate::ui::App;

pub fn width(size: NavSize) -> u16 {
    match size {
        NavSize::Small => 6,
        NavSize::Medium => 12,
        NavSize::Large => 16,
    }
}

fn item_label(size: NavSize, index: usize, title: &str) -> String {
    match size {
        NavSize::Small => format!("{}", index + 1),
        NavSize::Medium => format!("{} {:.6}", index + 1, title),
        NavSize::Large => format!("{} {}", index + 1, title),
    }
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme::BORDER_INACTIVE));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = app.store.visible_dock_items();
    let size = app.store.nav_size();
    let offset = app.store.nav_position().y.min(inner.height.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for _ in 0..offset {
        lines.push(Line::from(""));
    }
    for (idx, item) in visible.iter().enumerate() {
        let label = item_label(size, idx, item.view.title());
        let style = if item.view == app.view {
            Style::default()
                .fg(accent.primary)
                .add_modifier(ratatui::style::Modifier::BOLD)
        } else {
            theme::muted()
        };
        lines.push(Line::styled(label, style));
        if size == NavSize::Large {
            lines.push(Line::from(""));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::styled("s Set", theme::dim()));
    lines.push(Line::styled("p Quick", theme::dim()));

    f.render_widget(Paragraph::new(lines), inner);
}

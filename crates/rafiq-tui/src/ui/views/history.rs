//! History explorer: the fixed era catalog and AI-written summaries.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use rafiq_core::models::history::ERAS;

use crate::ui::app::OP_HISTORY;
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);

    let mut lines: Vec<Line> = vec![Line::styled("j/k select  enter explore", theme::dim())];
    for (idx, era) in ERAS.iter().enumerate() {
        let style = if idx == app.history.selected {
            theme::selected()
        } else {
            theme::primary()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", era.title), style),
            Span::styled(era.period, theme::dim()),
        ]));
    }
    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_INACTIVE))
            .title(" Eras "),
    );
    f.render_widget(list, chunks[0]);

    let body: Paragraph = if app.inflight.is_busy(OP_HISTORY) {
        Paragraph::new(Line::styled("Writing the chronicle...", theme::dim()))
    } else if let Some((title, summary)) = &app.history.summary {
        Paragraph::new(summary.clone())
            .wrap(Wrap { trim: false })
            .scroll((app.history.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent.primary))
                    .title(format!(" {title} ")),
            )
    } else {
        Paragraph::new(Line::styled(
            "Pick an era to explore its history.",
            theme::dim(),
        ))
    };
    f.render_widget(body, chunks[1]);
}

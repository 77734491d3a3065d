//! Hadith explorer: one query, one result card.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::app::OP_HADITH;
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search = Paragraph::new(app.hadith.query.value.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_ACTIVE))
            .title(" topic — e.g. Kindness, Charity, Science "),
    );
    f.render_widget(search, chunks[0]);

    if app.inflight.is_busy(OP_HADITH) {
        f.render_widget(
            Paragraph::new(Line::styled("Consulting scholars...", theme::dim())).centered(),
            chunks[1],
        );
        return;
    }

    let Some(result) = &app.hadith.result else {
        f.render_widget(
            Paragraph::new(Line::styled(
                "Search for authentic traditions by topic.",
                theme::dim(),
            )),
            chunks[1],
        );
        return;
    };

    let rtl = app.store.language().is_rtl();
    let mut lines: Vec<Line> = Vec::new();
    lines.push(
        Line::styled(
            result.arabic.clone(),
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
        .right_aligned(),
    );
    lines.push(Line::from(""));
    let translation = Line::styled(
        result.translation.clone(),
        Style::default().fg(accent.secondary),
    );
    lines.push(if rtl { translation.right_aligned() } else { translation });
    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!("— {}", result.reference),
        Style::default().fg(accent.primary),
    ));
    lines.push(Line::from(""));
    lines.push(Line::styled("Understanding", theme::muted()));
    lines.push(Line::styled(result.explanation.clone(), theme::primary()));

    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_INACTIVE)),
    );
    f.render_widget(card, chunks[1]);
}

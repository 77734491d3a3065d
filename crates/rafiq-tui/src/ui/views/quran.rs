//! Quran reader: searchable surah list, then verse-by-verse original text
//! with the translation edition for the selected language.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use rafiq_core::content::quran::filter_surahs;

use crate::ui::app::{OP_SURAHS, OP_SURAH_CONTENT};
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if let Some((number, _)) = &app.quran.reading {
        render_reader(f, app, area, *number);
    } else {
        render_list(f, app, area);
    }
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search
            Constraint::Min(0),    // list
        ])
        .split(area);

    let search = Paragraph::new(app.quran.query.value.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_ACTIVE))
            .title(" search surah — name or number "),
    );
    f.render_widget(search, chunks[0]);

    if app.inflight.is_busy(OP_SURAHS) {
        f.render_widget(
            Paragraph::new(Line::styled("Loading surahs...", theme::dim())),
            chunks[1],
        );
        return;
    }

    let filtered = filter_surahs(&app.quran.surahs, &app.quran.query.value);
    let visible_rows = chunks[1].height as usize;
    let selected = app.quran.selected.min(filtered.len().saturating_sub(1));
    let first = selected.saturating_sub(visible_rows.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for (idx, surah) in filtered.iter().enumerate().skip(first).take(visible_rows) {
        let style = if idx == selected {
            theme::selected()
        } else {
            theme::primary()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3}  ", surah.number), Style::default().fg(accent.primary)),
            Span::styled(format!("{:<18}", surah.english_name), style),
            Span::styled(
                format!("{:<24}", surah.english_name_translation),
                theme::muted(),
            ),
            Span::styled(
                format!("{} verses  {}", surah.number_of_ayahs, surah.name),
                theme::dim(),
            ),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::styled("No match.", theme::dim()));
    }
    f.render_widget(Paragraph::new(lines), chunks[1]);
}

fn render_reader(f: &mut Frame, app: &App, area: Rect, number: u32) {
    let accent = theme::accent(app.store.theme());
    let surah = app.quran.surahs.iter().find(|s| s.number == number);
    let title = surah
        .map(|s| format!(" {} • {} • {} verses ", s.english_name, s.name, s.number_of_ayahs))
        .unwrap_or_else(|| format!(" Surah {number} "));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent.primary))
        .title(title)
        .title_style(theme::title_style(app.store.theme()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.inflight.is_busy(OP_SURAH_CONTENT) {
        f.render_widget(Paragraph::new(Line::styled("Loading...", theme::dim())), inner);
        return;
    }

    let Some((_, ayahs)) = &app.quran.reading else {
        return;
    };

    let rtl_translation = app.store.language().is_rtl();
    let mut lines: Vec<Line> = vec![Line::styled(
        "esc back  j/k scroll",
        theme::dim(),
    )];
    for ayah in ayahs {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("({}) ", ayah.number), Style::default().fg(accent.primary)),
            Span::styled(
                ayah.text.clone(),
                Style::default()
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
        .right_aligned());
        let translation = Line::styled(ayah.translation.clone(), Style::default().fg(accent.secondary));
        lines.push(if rtl_translation {
            translation.right_aligned()
        } else {
            translation
        });
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.quran.scroll, 0));
    f.render_widget(paragraph, inner);
}

//! The AI studio: chat (text or live voice), media creation, and media
//! analysis.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use rafiq_core::live::LiveState;
use rafiq_core::models::{ChatRole, GroundingTool};

use crate::ui::app::{ChatMode, CreateMode, StudioMode, OP_ANALYZE, OP_CHAT, OP_MEDIA};
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_mode_bar(f, app, chunks[0]);

    match app.studio.mode {
        StudioMode::Chat => render_chat(f, app, chunks[1]),
        StudioMode::Create => render_create(f, app, chunks[1]),
        StudioMode::Analyze => render_analyze(f, app, chunks[1]),
    }
}

fn render_mode_bar(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let mut spans: Vec<Span> = vec![Span::styled("AI Studio  ", theme::title_style(app.store.theme()))];
    for (mode, label, key) in [
        (StudioMode::Chat, "Chat", "c"),
        (StudioMode::Create, "Create", "v"),
        (StudioMode::Analyze, "Analyze", "z"),
    ] {
        let style = if app.studio.mode == mode {
            Style::default().fg(accent.primary).add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!("[{key}] {label}  "), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chat(f: &mut Frame, app: &App, area: Rect) {
    match app.studio.chat_mode {
        ChatMode::Text => render_text_chat(f, app, area),
        ChatMode::Voice => render_voice_chat(f, app, area),
    }
}

fn render_text_chat(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tool toggles
            Constraint::Min(0),    // transcript
            Constraint::Length(3), // input
        ])
        .split(area);

    let mut tool_spans: Vec<Span> =
        vec![Span::styled("m voice mode  a speak reply  tools: ", theme::dim())];
    for (tool, label) in [
        (GroundingTool::Search, "t Search"),
        (GroundingTool::Maps, "T Maps"),
    ] {
        let style = if app.studio.tool == tool {
            Style::default().fg(accent.primary).add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        tool_spans.push(Span::styled(format!("{label}  "), style));
    }
    f.render_widget(Paragraph::new(Line::from(tool_spans)), chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for message in &app.studio.messages {
        let (who, style) = match message.role {
            ChatRole::User => ("you", Style::default().fg(accent.primary)),
            ChatRole::Model => ("rafiq", Style::default().fg(accent.secondary)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{who}: "), style.add_modifier(Modifier::BOLD)),
            Span::styled(message.text.clone(), theme::primary()),
        ]));
    }
    if app.inflight.is_busy(OP_CHAT) {
        lines.push(Line::styled("thinking...", theme::dim()));
    }
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme::BORDER_INACTIVE)));
    f.render_widget(transcript, chunks[1]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", theme::muted()),
        Span::styled(app.studio.chat_input.value.clone(), theme::primary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_ACTIVE))
            .title(" enter send "),
    );
    f.render_widget(input, chunks[2]);
}

fn render_voice_chat(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let (headline, detail) = match app.live_state {
        LiveState::Idle => ("Tap to Start Conversation", "enter connect live  m text mode"),
        LiveState::Connecting => ("Connecting...", "requesting microphone and session"),
        LiveState::Active => ("Listening...", "enter end session"),
        LiveState::Closing => ("Ending...", ""),
    };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::styled(
            "  ((( 🎙 )))  ",
            if app.live_state == LiveState::Active {
                Style::default().fg(accent.primary).add_modifier(Modifier::BOLD)
            } else {
                theme::dim()
            },
        ),
        Line::from(""),
        Line::styled(headline, theme::primary()),
        Line::from(""),
        Line::styled(detail, theme::dim()),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_INACTIVE))
        .title(" Live Voice ");
    f.render_widget(
        Paragraph::new(lines).centered().block(block),
        area,
    );
}

fn render_create(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // mode row
            Constraint::Length(3), // prompt
            Constraint::Length(1), // options
            Constraint::Length(3), // file path
            Constraint::Min(0),    // result
        ])
        .split(area);

    let mut mode_spans: Vec<Span> = Vec::new();
    for mode in [CreateMode::ImageGen, CreateMode::ImageEdit, CreateMode::VideoGen] {
        let style = if app.studio.create_mode == mode {
            Style::default().fg(accent.primary).add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };
        mode_spans.push(Span::styled(format!("{}  ", mode.label()), style));
    }
    mode_spans.push(Span::styled("(n cycles mode)", theme::dim()));
    f.render_widget(Paragraph::new(Line::from(mode_spans)), chunks[0]);

    let prompt = Paragraph::new(app.studio.prompt.value.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_ACTIVE))
            .title(" prompt — enter generates "),
    );
    f.render_widget(prompt, chunks[1]);

    let busy = app.inflight.is_busy(OP_MEDIA);
    let options = Line::from(vec![
        Span::styled(
            format!("ratio {} (r)  ", app.studio.ratio.as_str()),
            theme::muted(),
        ),
        Span::styled(
            format!("size {} (u)  ", app.studio.size.as_str()),
            theme::muted(),
        ),
        Span::styled(
            if busy {
                if app.studio.video_cancel.is_some() {
                    "generating... (x cancels)"
                } else {
                    "generating..."
                }
            } else {
                ""
            },
            Style::default().fg(theme::ACCENT_WARNING),
        ),
    ]);
    f.render_widget(Paragraph::new(options), chunks[2]);

    let file = Paragraph::new(app.studio.file_path.value.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_INACTIVE))
            .title(" reference image path (tab focuses) "),
    );
    f.render_widget(file, chunks[3]);

    let result = match &app.studio.generated {
        Some(artifact) => Line::styled(
            format!("✓ {}", artifact.describe()),
            Style::default().fg(theme::ACCENT_SUCCESS),
        ),
        None => Line::styled("No creation yet.", theme::dim()),
    };
    f.render_widget(Paragraph::new(result).wrap(Wrap { trim: true }), chunks[4]);
}

fn render_analyze(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // path
            Constraint::Length(1), // hint
            Constraint::Min(0),    // result
        ])
        .split(area);

    let path = Paragraph::new(app.studio.analyze_path.value.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_ACTIVE))
            .title(" media path — image, video, or audio "),
    );
    f.render_widget(path, chunks[0]);

    let hint = if app.inflight.is_busy(OP_ANALYZE) {
        Line::styled("Analyzing...", Style::default().fg(theme::ACCENT_WARNING))
    } else {
        Line::styled("enter analyzes; audio files are transcribed", theme::dim())
    };
    f.render_widget(Paragraph::new(hint), chunks[1]);

    if let Some(analysis) = &app.studio.analysis {
        let result = Paragraph::new(analysis.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER_INACTIVE))
                    .title(" result "),
            );
        f.render_widget(result, chunks[2]);
    }
}

// Centralized styling. Base colors are fixed; the accent set shifts with the
// selected AppTheme.

use ratatui::style::{Color, Modifier, Style};

use rafiq_core::models::AppTheme;

/// App background.
pub const BG_APP: Color = Color::Rgb(12, 12, 14);

/// Focus view background, darker than everything else.
pub const BG_FOCUS: Color = Color::Rgb(5, 5, 5);

/// Card background.
pub const BG_CARD: Color = Color::Rgb(22, 22, 26);

/// Selected row background.
pub const BG_SELECTED: Color = Color::Rgb(38, 38, 44);

/// Primary text.
pub const TEXT_PRIMARY: Color = Color::Rgb(222, 222, 222);

/// Muted text.
pub const TEXT_MUTED: Color = Color::Rgb(130, 130, 130);

/// Dim text for hints and placeholders.
pub const TEXT_DIM: Color = Color::Rgb(88, 88, 88);

/// Error accent.
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Success accent.
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 176, 110);

/// Warning accent.
pub const ACCENT_WARNING: Color = Color::Rgb(214, 164, 96);

/// Inactive border.
pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 64);

/// Active border.
pub const BORDER_ACTIVE: Color = Color::Rgb(110, 110, 118);

/// Theme accents: the primary tint and a soft secondary used for highlights.
#[derive(Debug, Clone, Copy)]
pub struct ThemeAccent {
    pub primary: Color,
    pub secondary: Color,
}

pub fn accent(theme: AppTheme) -> ThemeAccent {
    match theme {
        AppTheme::Standard => ThemeAccent {
            primary: Color::Rgb(112, 130, 224),
            secondary: Color::Rgb(196, 120, 168),
        },
        AppTheme::Ramadan => ThemeAccent {
            primary: Color::Rgb(80, 180, 130),
            secondary: Color::Rgb(140, 200, 160),
        },
        AppTheme::Eid => ThemeAccent {
            primary: Color::Rgb(172, 110, 210),
            secondary: Color::Rgb(220, 130, 180),
        },
        AppTheme::Hajj => ThemeAccent {
            primary: Color::Rgb(110, 170, 220),
            secondary: Color::Rgb(150, 200, 220),
        },
        AppTheme::Nocturnal => ThemeAccent {
            primary: Color::Rgb(150, 150, 160),
            secondary: Color::Rgb(100, 100, 110),
        },
    }
}

pub fn title_style(theme: AppTheme) -> Style {
    Style::default()
        .fg(accent(theme).primary)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

pub fn selected() -> Style {
    Style::default()
        .bg(BG_SELECTED)
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

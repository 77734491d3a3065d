use serde::{Deserialize, Serialize};

/// Visual theme. Each theme tints the UI accents; the Focus view always
/// renders on the darkest background regardless of theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppTheme {
    Standard,
    Ramadan,
    Eid,
    Hajj,
    Nocturnal,
}

impl AppTheme {
    pub const ALL: [AppTheme; 5] = [
        AppTheme::Standard,
        AppTheme::Ramadan,
        AppTheme::Eid,
        AppTheme::Hajj,
        AppTheme::Nocturnal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppTheme::Standard => "Modern Dark",
            AppTheme::Ramadan => "Blessed Ramadan",
            AppTheme::Eid => "Festive Eid",
            AppTheme::Hajj => "Pure Hajj",
            AppTheme::Nocturnal => "Deep Night",
        }
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        AppTheme::Standard
    }
}

/// Size of the dock bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavSize {
    Small,
    Medium,
    Large,
}

impl NavSize {
    pub const ALL: [NavSize; 3] = [NavSize::Small, NavSize::Medium, NavSize::Large];

    pub fn label(&self) -> &'static str {
        match self {
            NavSize::Small => "Small",
            NavSize::Medium => "Medium",
            NavSize::Large => "Large",
        }
    }
}

impl Default for NavSize {
    fn default() -> Self {
        NavSize::Medium
    }
}

use serde::{Deserialize, Serialize};

/// Interface language. The selected language flows into every AI prompt and
/// picks the Quran translation edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppLanguage {
    English,
    Urdu,
    Arabic,
    Pashto,
    Spanish,
    French,
    German,
    Hindi,
    Bengali,
    Chinese,
    Russian,
    Portuguese,
    Turkish,
}

impl AppLanguage {
    pub const ALL: [AppLanguage; 13] = [
        AppLanguage::English,
        AppLanguage::Urdu,
        AppLanguage::Arabic,
        AppLanguage::Pashto,
        AppLanguage::Spanish,
        AppLanguage::French,
        AppLanguage::German,
        AppLanguage::Hindi,
        AppLanguage::Bengali,
        AppLanguage::Chinese,
        AppLanguage::Russian,
        AppLanguage::Portuguese,
        AppLanguage::Turkish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AppLanguage::English => "English",
            AppLanguage::Urdu => "Urdu",
            AppLanguage::Arabic => "Arabic",
            AppLanguage::Pashto => "Pashto",
            AppLanguage::Spanish => "Spanish",
            AppLanguage::French => "French",
            AppLanguage::German => "German",
            AppLanguage::Hindi => "Hindi",
            AppLanguage::Bengali => "Bengali",
            AppLanguage::Chinese => "Chinese",
            AppLanguage::Russian => "Russian",
            AppLanguage::Portuguese => "Portuguese",
            AppLanguage::Turkish => "Turkish",
        }
    }

    /// Right-to-left scripts get right-aligned rendering.
    pub fn is_rtl(&self) -> bool {
        matches!(
            self,
            AppLanguage::Urdu | AppLanguage::Arabic | AppLanguage::Pashto
        )
    }
}

impl Default for AppLanguage {
    fn default() -> Self {
        AppLanguage::English
    }
}

impl std::fmt::Display for AppLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

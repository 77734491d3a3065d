use serde::{Deserialize, Serialize};

/// A single Hadith search result: the Arabic text with its translation,
/// canonical reference, and a short scholarly explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HadithResult {
    pub arabic: String,
    pub translation: String,
    pub reference: String,
    pub explanation: String,
}

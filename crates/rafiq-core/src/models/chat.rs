use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the Studio chat. The log lives in memory only and is cleared
/// when the app restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Optional grounding tool for a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundingTool {
    None,
    Search,
    Maps,
}

impl GroundingTool {
    pub fn label(&self) -> &'static str {
        match self {
            GroundingTool::None => "none",
            GroundingTool::Search => "search",
            GroundingTool::Maps => "maps",
        }
    }
}

impl Default for GroundingTool {
    fn default() -> Self {
        GroundingTool::None
    }
}

pub mod chat;
pub mod dock;
pub mod hadith;
pub mod history;
pub mod language;
pub mod media;
pub mod profile;
pub mod quiz;
pub mod schedule;
pub mod theme;

pub use chat::{ChatMessage, ChatRole, GroundingTool};
pub use dock::{DockItem, DockView};
pub use hadith::HadithResult;
pub use history::HistoryEra;
pub use language::AppLanguage;
pub use media::{AspectRatio, ImageSize, MediaArtifact};
pub use profile::{Gender, UserProfile};
pub use quiz::Mcq;
pub use schedule::{ScheduleItem, Subtask};
pub use theme::{AppTheme, NavSize};

//! The application state owner: current view, modal, per-view state, and
//! dispatch of background AI work. Results come back as `UiEvent`s on the
//! runtime channel; nothing here blocks the UI thread.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use rafiq_core::ai::{AssistantClient, InFlight};
use rafiq_core::content::{Ayah, QuranClient, Surah};
use rafiq_core::error::AiError;
use rafiq_core::live::{LiveEvent, LiveRegistry, LiveSessionHandle, LiveState};
use rafiq_core::models::{
    AspectRatio, ChatMessage, DockView, GroundingTool, HadithResult, ImageSize, Mcq,
    MediaArtifact, ScheduleItem, UserProfile,
};
use rafiq_core::store::AppStore;
use rafiq_core::weather::Weather;

use crate::ui::state::{FocusTimer, OnboardingForm, TextField};

// Logical operation keys for the duplicate-submission guard.
pub const OP_PLAN: &str = "plan";
pub const OP_SUGGESTIONS: &str = "suggestions";
pub const OP_SUBTASKS: &str = "subtasks";
pub const OP_MCQ: &str = "mcq";
pub const OP_HADITH: &str = "hadith";
pub const OP_HISTORY: &str = "history";
pub const OP_STRATEGY: &str = "strategy";
pub const OP_BRIEFING: &str = "briefing";
pub const OP_CHAT: &str = "chat";
pub const OP_MEDIA: &str = "media";
pub const OP_ANALYZE: &str = "analyze";
pub const OP_ONBOARD: &str = "onboard";
pub const OP_SURAHS: &str = "surahs";
pub const OP_SURAH_CONTENT: &str = "surah_content";
pub const OP_TTS: &str = "tts";

/// Voice used for spoken chat replies.
const TTS_VOICE: &str = "Kore";

/// Results and notifications flowing back into the runtime loop.
pub enum UiEvent {
    ScheduleGenerated(Result<Vec<ScheduleItem>, AiError>),
    SuggestionsReady(Result<Vec<String>, AiError>),
    SubtasksReady {
        item_id: u64,
        result: Result<Vec<String>, AiError>,
    },
    McqReady(Result<Mcq, AiError>),
    HadithReady(Result<HadithResult, AiError>),
    HistoryReady {
        title: &'static str,
        result: Result<String, AiError>,
    },
    StrategyReady {
        topic: String,
        result: Result<Vec<String>, AiError>,
    },
    BriefingReady(Result<String, AiError>),
    ChatReply(Result<String, AiError>),
    MediaReady(Result<MediaArtifact, AiError>),
    AnalysisReady(Result<String, AiError>),
    SurahsLoaded(Result<Vec<Surah>, String>),
    SurahContentLoaded {
        number: u32,
        result: Result<Vec<Ayah>, String>,
    },
    SpeechReady(Result<Vec<u8>, AiError>),
    WeatherReady(Weather),
    OnboardingValidated {
        profile: UserProfile,
        location_ok: bool,
    },
    Live(LiveEvent),
}

/// Whether keystrokes navigate or type into the focused text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which text field is receiving keystrokes while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    ChatInput,
    CreatePrompt,
    CreateFile,
    AnalyzePath,
    QuranQuery,
    HadithQuery,
    HubTopic,
    HubBacklog,
    PlanPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioMode {
    Chat,
    Create,
    Analyze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    Text,
    Voice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    ImageGen,
    ImageEdit,
    VideoGen,
}

impl CreateMode {
    pub fn label(&self) -> &'static str {
        match self {
            CreateMode::ImageGen => "Image Gen",
            CreateMode::ImageEdit => "Image Edit",
            CreateMode::VideoGen => "Video Gen",
        }
    }
}

pub struct TimelineState {
    pub selected: usize,
    pub expanded: Option<u64>,
    pub sub_cursor: usize,
    pub suggestions: Vec<String>,
    pub plan_input: TextField,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            selected: 0,
            expanded: None,
            sub_cursor: 0,
            suggestions: Vec::new(),
            plan_input: TextField::default(),
        }
    }
}

pub struct StudioState {
    pub mode: StudioMode,
    pub chat_mode: ChatMode,
    pub create_mode: CreateMode,
    pub chat_input: TextField,
    pub messages: Vec<ChatMessage>,
    pub tool: GroundingTool,
    pub prompt: TextField,
    pub ratio: AspectRatio,
    pub size: ImageSize,
    pub file_path: TextField,
    pub generated: Option<MediaArtifact>,
    pub analyze_path: TextField,
    pub analysis: Option<String>,
    pub video_cancel: Option<CancellationToken>,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            mode: StudioMode::Chat,
            chat_mode: ChatMode::Text,
            create_mode: CreateMode::ImageGen,
            chat_input: TextField::default(),
            messages: Vec::new(),
            tool: GroundingTool::None,
            prompt: TextField::default(),
            ratio: AspectRatio::Square,
            size: ImageSize::OneK,
            file_path: TextField::default(),
            generated: None,
            analyze_path: TextField::default(),
            analysis: None,
            video_cancel: None,
        }
    }
}

#[derive(Default)]
pub struct QuranState {
    pub surahs: Vec<Surah>,
    pub query: TextField,
    pub selected: usize,
    /// `Some` while reading a chapter.
    pub reading: Option<(u32, Vec<Ayah>)>,
    pub scroll: u16,
}

#[derive(Default)]
pub struct HadithState {
    pub query: TextField,
    pub result: Option<HadithResult>,
}

#[derive(Default)]
pub struct HistoryState {
    pub selected: usize,
    pub summary: Option<(&'static str, String)>,
    pub scroll: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubFocus {
    Topic,
    Backlog,
}

pub struct HubState {
    pub focus: HubFocus,
    pub topic: TextField,
    pub mcq: Option<Mcq>,
    pub chosen: Option<usize>,
    pub backlog_input: TextField,
    pub backlog_cursor: usize,
}

impl Default for HubState {
    fn default() -> Self {
        Self {
            focus: HubFocus::Topic,
            topic: TextField::default(),
            mcq: None,
            chosen: None,
            backlog_input: TextField::default(),
            backlog_cursor: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    Profile,
    NavSize,
    Dock,
    Language,
    Theme,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 5] = [
        SettingsSection::Profile,
        SettingsSection::NavSize,
        SettingsSection::Dock,
        SettingsSection::Language,
        SettingsSection::Theme,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsSection::Profile => "Profile",
            SettingsSection::NavSize => "Dock Size",
            SettingsSection::Dock => "Customize Dock",
            SettingsSection::Language => "Language",
            SettingsSection::Theme => "Theme",
        }
    }
}

pub struct SettingsState {
    pub section: SettingsSection,
    pub cursor: usize,
    pub name: TextField,
    pub location: TextField,
    /// True while typing into a profile field.
    pub editing: bool,
}

impl SettingsState {
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        Self {
            section: SettingsSection::Profile,
            cursor: 0,
            name: TextField {
                value: profile.map(|p| p.name.clone()).unwrap_or_default(),
            },
            location: TextField {
                value: profile.map(|p| p.location.clone()).unwrap_or_default(),
            },
            editing: false,
        }
    }
}

/// Modal overlays, one at a time.
pub enum Modal {
    None,
    Onboarding,
    Settings(SettingsState),
    QuickPanel { cursor: usize },
    PlanPrompt,
    Strategy {
        topic: String,
        steps: Option<Vec<String>>,
    },
    Briefing(Option<String>),
}

impl Modal {
    pub fn is_none(&self) -> bool {
        matches!(self, Modal::None)
    }
}

pub struct App {
    pub running: bool,
    pub store: AppStore,
    pub assistant: Arc<AssistantClient>,
    pub quran_client: Arc<QuranClient>,
    pub inflight: InFlight,
    pub events_tx: mpsc::Sender<UiEvent>,
    api_key: Option<String>,

    pub view: DockView,
    pub input_mode: InputMode,
    pub edit_target: Option<EditTarget>,
    pub modal: Modal,
    pub onboarding: OnboardingForm,
    pub status: Option<String>,
    pub frame: u64,
    pub weather: Option<Weather>,

    pub live_registry: LiveRegistry,
    pub live_handle: Option<LiveSessionHandle>,
    pub live_state: LiveState,

    pub timeline: TimelineState,
    pub focus: FocusTimer,
    pub studio: StudioState,
    pub quran: QuranState,
    pub hadith: HadithState,
    pub history: HistoryState,
    pub hub: HubState,
}

impl App {
    pub fn new(
        store: AppStore,
        assistant: Arc<AssistantClient>,
        api_key: Option<String>,
        events_tx: mpsc::Sender<UiEvent>,
    ) -> Self {
        let modal = if store.needs_onboarding() {
            Modal::Onboarding
        } else {
            Modal::None
        };
        Self {
            running: true,
            store,
            assistant,
            quran_client: Arc::new(QuranClient::new()),
            inflight: InFlight::new(),
            events_tx,
            api_key,
            view: DockView::Timeline,
            input_mode: InputMode::Normal,
            edit_target: None,
            modal,
            onboarding: OnboardingForm::default(),
            status: None,
            frame: 0,
            weather: None,
            live_registry: LiveRegistry::new(),
            live_handle: None,
            live_state: LiveState::Idle,
            timeline: TimelineState::default(),
            focus: FocusTimer::default(),
            studio: StudioState::default(),
            quran: QuranState::default(),
            hadith: HadithState::default(),
            history: HistoryState::default(),
            hub: HubState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn is_offline(&self) -> bool {
        self.assistant.is_offline()
    }

    pub fn toggle_offline(&mut self) {
        let now_offline = !self.assistant.is_offline();
        self.assistant.set_offline(now_offline);
        self.notify(if now_offline {
            "Offline mode: AI features disabled"
        } else {
            "Back online"
        });
    }

    /// Switch to a view by its position among the visible dock items.
    pub fn select_dock_slot(&mut self, slot: usize) {
        let visible = self.store.visible_dock_items();
        if let Some(item) = visible.get(slot) {
            self.view = item.view;
            self.after_view_change();
        }
    }

    pub fn cycle_view(&mut self, forward: bool) {
        let visible = self.store.visible_dock_items();
        if visible.is_empty() {
            return;
        }
        let current = visible.iter().position(|i| i.view == self.view).unwrap_or(0);
        let next = if forward {
            (current + 1) % visible.len()
        } else {
            (current + visible.len() - 1) % visible.len()
        };
        self.view = visible[next].view;
        self.after_view_change();
    }

    fn after_view_change(&mut self) {
        // The surah listing loads lazily on first visit.
        if self.view == DockView::Quran {
            self.load_surahs();
        }
    }

    /// Persist-layer errors surface on the status bar, never crash the UI.
    pub fn store_result(&mut self, result: Result<(), rafiq_core::StoreError>) {
        if let Err(e) = result {
            warn!("store write failed: {e}");
            self.notify(format!("Save failed: {e}"));
        }
    }

    // =========================================================================
    // Background AI dispatch
    // =========================================================================

    fn begin(&mut self, op: &'static str) -> bool {
        match self.inflight.begin(op) {
            Ok(()) => true,
            Err(e) => {
                self.notify(e.to_string());
                false
            }
        }
    }

    pub fn request_plan(&mut self, prompt: String) {
        if prompt.trim().is_empty() || !self.begin(OP_PLAN) {
            return;
        }
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let result = assistant.generate_daily_schedule(&prompt, language).await;
            let _ = tx.send(UiEvent::ScheduleGenerated(result)).await;
        });
    }

    pub fn request_suggestions(&mut self) {
        let Some(profile) = self.store.profile().cloned() else {
            return;
        };
        if self.store.schedule().is_empty() || !self.begin(OP_SUGGESTIONS) {
            return;
        }
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        let schedule = self.store.schedule().to_vec();
        tokio::spawn(async move {
            let result = assistant
                .generate_daily_suggestions(&profile, &schedule, language)
                .await;
            let _ = tx.send(UiEvent::SuggestionsReady(result)).await;
        });
    }

    pub fn request_subtasks(&mut self, item_id: u64, title: String) {
        if !self.begin(OP_SUBTASKS) {
            return;
        }
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let result = assistant.generate_category_subtasks(&title, language).await;
            let _ = tx.send(UiEvent::SubtasksReady { item_id, result }).await;
        });
    }

    pub fn request_mcq(&mut self, topic: String) {
        if topic.trim().is_empty() || !self.begin(OP_MCQ) {
            return;
        }
        self.hub.mcq = None;
        self.hub.chosen = None;
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let result = assistant.generate_mcq(&topic, language).await;
            let _ = tx.send(UiEvent::McqReady(result)).await;
        });
    }

    pub fn request_hadith(&mut self, query: String) {
        if query.trim().is_empty() || !self.begin(OP_HADITH) {
            return;
        }
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let result = assistant.search_hadith(&query, language).await;
            let _ = tx.send(UiEvent::HadithReady(result)).await;
        });
    }

    pub fn request_history(&mut self, title: &'static str) {
        if !self.begin(OP_HISTORY) {
            return;
        }
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let result = assistant.explore_history(title, language).await;
            let _ = tx.send(UiEvent::HistoryReady { title, result }).await;
        });
    }

    pub fn request_strategy(&mut self, topic: String) {
        if self.is_offline() {
            self.notify("AI study strategies require a connection");
            return;
        }
        if !self.begin(OP_STRATEGY) {
            return;
        }
        self.modal = Modal::Strategy {
            topic: topic.clone(),
            steps: None,
        };
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let result = assistant.generate_strategy(&topic, language).await;
            let _ = tx.send(UiEvent::StrategyReady { topic, result }).await;
        });
    }

    pub fn request_briefing(&mut self) {
        let Some(profile) = self.store.profile().cloned() else {
            return;
        };
        if self.is_offline() || !self.begin(OP_BRIEFING) {
            return;
        }
        self.modal = Modal::Briefing(None);
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        let theme = self.store.theme();
        let count = self.store.schedule().len();
        tokio::spawn(async move {
            let result = assistant.daily_briefing(&profile, count, theme, language).await;
            let _ = tx.send(UiEvent::BriefingReady(result)).await;
        });
    }

    pub fn send_chat(&mut self) {
        let prompt = self.studio.chat_input.take();
        if prompt.is_empty() || !self.begin(OP_CHAT) {
            return;
        }
        self.studio.messages.push(ChatMessage::user(prompt.clone()));
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        let tool = self.studio.tool;
        tokio::spawn(async move {
            let result = assistant.chat(&prompt, tool, language).await;
            let _ = tx.send(UiEvent::ChatReply(result)).await;
        });
    }

    pub fn request_creation(&mut self) {
        let prompt = self.studio.prompt.value.trim().to_string();
        if prompt.is_empty() || !self.begin(OP_MEDIA) {
            return;
        }
        self.studio.generated = None;
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let mode = self.studio.create_mode;
        let ratio = self.studio.ratio;
        let size = self.studio.size;
        let file_path = self.studio.file_path.value.trim().to_string();

        let cancel = CancellationToken::new();
        if mode == CreateMode::VideoGen {
            self.studio.video_cancel = Some(cancel.clone());
        }

        tokio::spawn(async move {
            let reference = if file_path.is_empty() {
                None
            } else {
                match tokio::fs::read(&file_path).await {
                    Ok(bytes) => Some((bytes, guess_mime(&file_path))),
                    Err(e) => {
                        let _ = tx
                            .send(UiEvent::MediaReady(Err(AiError::Decode(format!(
                                "cannot read {file_path}: {e}"
                            )))))
                            .await;
                        return;
                    }
                }
            };

            let result = match mode {
                CreateMode::ImageGen => assistant.generate_image(&prompt, size, ratio).await,
                CreateMode::ImageEdit => match &reference {
                    Some((bytes, mime)) => assistant.edit_image(bytes, mime, &prompt).await,
                    None => Err(AiError::Decode("image edit needs a reference file".into())),
                },
                CreateMode::VideoGen => {
                    let reference = reference
                        .as_ref()
                        .map(|(bytes, mime)| (bytes.as_slice(), mime.as_str()));
                    assistant
                        .generate_video(&prompt, ratio, reference, &cancel)
                        .await
                }
            };
            let _ = tx.send(UiEvent::MediaReady(result)).await;
        });
    }

    pub fn cancel_video(&mut self) {
        if let Some(cancel) = self.studio.video_cancel.take() {
            cancel.cancel();
            self.notify("Video generation cancelled");
        }
    }

    pub fn request_analysis(&mut self) {
        let path = self.studio.analyze_path.value.trim().to_string();
        if path.is_empty() || !self.begin(OP_ANALYZE) {
            return;
        }
        self.studio.analysis = None;
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    let _ = tx
                        .send(UiEvent::AnalysisReady(Err(AiError::Decode(format!(
                            "cannot read {path}: {e}"
                        )))))
                        .await;
                    return;
                }
            };
            let mime = guess_mime(&path);
            let result = if mime.starts_with("audio") {
                assistant.transcribe_audio(&bytes, &mime).await
            } else {
                let prompt = format!("Analyze this content in detail. (Respond in {language})");
                assistant.analyze_media(&bytes, &mime, &prompt).await
            };
            let _ = tx.send(UiEvent::AnalysisReady(result)).await;
        });
    }

    /// Speak the most recent model reply aloud.
    pub fn speak_last_reply(&mut self) {
        let Some(text) = self
            .studio
            .messages
            .iter()
            .rev()
            .find(|m| m.role == rafiq_core::models::ChatRole::Model)
            .map(|m| m.text.clone())
        else {
            self.notify("Nothing to speak yet");
            return;
        };
        if !self.begin(OP_TTS) {
            return;
        }
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = assistant.synthesize_speech(&text, TTS_VOICE).await;
            let _ = tx.send(UiEvent::SpeechReady(result)).await;
        });
    }

    /// Nudge the dock bar vertically and persist the new offset.
    pub fn nudge_dock(&mut self, dy: i16) {
        let mut pos = self.store.nav_position();
        pos.y = pos.y.saturating_add_signed(dy);
        let result = self.store.set_nav_position(pos);
        self.store_result(result);
    }

    pub fn load_surahs(&mut self) {
        if !self.quran.surahs.is_empty() || self.inflight.is_busy(OP_SURAHS) {
            return;
        }
        if !self.begin(OP_SURAHS) {
            return;
        }
        let client = self.quran_client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_surahs().await.map_err(|e| e.to_string());
            let _ = tx.send(UiEvent::SurahsLoaded(result)).await;
        });
    }

    pub fn open_surah(&mut self, number: u32) {
        if !self.begin(OP_SURAH_CONTENT) {
            return;
        }
        let client = self.quran_client.clone();
        let tx = self.events_tx.clone();
        let language = self.store.language();
        tokio::spawn(async move {
            let result = client
                .fetch_surah(number, language)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(UiEvent::SurahContentLoaded { number, result }).await;
        });
    }

    /// Submit the onboarding form: synchronous checks here, location
    /// plausibility in the background.
    pub fn submit_onboarding(&mut self) {
        let profile = match self.onboarding.build() {
            Ok(profile) => profile,
            Err(rejection) => {
                self.onboarding.error = Some(rejection.message().to_string());
                return;
            }
        };
        if !self.begin(OP_ONBOARD) {
            return;
        }
        self.onboarding.validating = true;
        let assistant = self.assistant.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let location_ok = assistant.validate_location(&profile.location).await;
            let _ = tx
                .send(UiEvent::OnboardingValidated {
                    profile,
                    location_ok,
                })
                .await;
        });
    }

    pub fn skip_onboarding(&mut self) {
        let result = self.store.set_profile(UserProfile::guest());
        self.store_result(result);
        self.modal = Modal::None;
    }

    // =========================================================================
    // Live session
    // =========================================================================

    pub fn toggle_live(&mut self) {
        if let Some(handle) = self.live_handle.take() {
            handle.stop();
            return;
        }
        let Some(api_key) = self.api_key.clone() else {
            self.notify("Live voice needs an API key (--api-key or GEMINI_API_KEY)");
            return;
        };
        if self.is_offline() {
            self.notify("Live voice requires a connection");
            return;
        }

        let (live_tx, mut live_rx) = mpsc::channel::<LiveEvent>(64);
        let forward = self.events_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = live_rx.recv().await {
                if forward.send(UiEvent::Live(event)).await.is_err() {
                    break;
                }
            }
        });

        match self.live_registry.start(api_key, live_tx) {
            Ok(handle) => {
                self.live_handle = Some(handle);
            }
            Err(e) => self.notify(format!("Could not start live voice: {e}")),
        }
    }

    // =========================================================================
    // Event application
    // =========================================================================

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ScheduleGenerated(result) => {
                self.inflight.finish(OP_PLAN);
                match result {
                    Ok(items) => {
                        let write = self.store.replace_schedule(items);
                        self.store_result(write);
                        self.timeline = TimelineState::default();
                        if matches!(self.modal, Modal::PlanPrompt) {
                            self.modal = Modal::None;
                        }
                    }
                    Err(e) => self.notify(format!("Failed to generate schedule: {e}")),
                }
            }
            UiEvent::SuggestionsReady(result) => {
                self.inflight.finish(OP_SUGGESTIONS);
                match result {
                    Ok(suggestions) => self.timeline.suggestions = suggestions,
                    Err(e) => warn!("suggestions failed: {e}"),
                }
            }
            UiEvent::SubtasksReady { item_id, result } => {
                self.inflight.finish(OP_SUBTASKS);
                match result {
                    Ok(texts) => {
                        let write = self.store.append_subtasks(item_id, texts);
                        self.store_result(write);
                    }
                    Err(e) => self.notify(format!("Subtask suggestions failed: {e}")),
                }
            }
            UiEvent::McqReady(result) => {
                self.inflight.finish(OP_MCQ);
                match result {
                    Ok(mcq) => self.hub.mcq = Some(mcq),
                    Err(e) => self.notify(format!("Drill generation failed: {e}")),
                }
            }
            UiEvent::HadithReady(result) => {
                self.inflight.finish(OP_HADITH);
                match result {
                    Ok(found) => self.hadith.result = Some(found),
                    Err(e) => self.notify(format!("Hadith search failed: {e}")),
                }
            }
            UiEvent::HistoryReady { title, result } => {
                self.inflight.finish(OP_HISTORY);
                match result {
                    Ok(summary) => {
                        self.history.summary = Some((title, summary));
                        self.history.scroll = 0;
                    }
                    Err(e) => self.notify(format!("History summary failed: {e}")),
                }
            }
            UiEvent::StrategyReady { topic, result } => {
                self.inflight.finish(OP_STRATEGY);
                match result {
                    Ok(steps) => {
                        if let Modal::Strategy { topic: open, steps: slot } = &mut self.modal {
                            if *open == topic {
                                *slot = Some(steps);
                            }
                        }
                    }
                    Err(e) => {
                        self.modal = Modal::None;
                        self.notify(format!("Strategy failed: {e}"));
                    }
                }
            }
            UiEvent::BriefingReady(result) => {
                self.inflight.finish(OP_BRIEFING);
                match result {
                    Ok(text) => {
                        if let Modal::Briefing(slot) = &mut self.modal {
                            *slot = Some(text);
                        }
                    }
                    Err(e) => {
                        if matches!(self.modal, Modal::Briefing(_)) {
                            self.modal = Modal::None;
                        }
                        self.notify(format!("Briefing failed: {e}"));
                    }
                }
            }
            UiEvent::ChatReply(result) => {
                self.inflight.finish(OP_CHAT);
                let text = match result {
                    Ok(text) => text,
                    Err(e) => format!("Error: {e}"),
                };
                self.studio.messages.push(ChatMessage::model(text));
            }
            UiEvent::MediaReady(result) => {
                self.inflight.finish(OP_MEDIA);
                self.studio.video_cancel = None;
                match result {
                    Ok(artifact) => self.studio.generated = Some(artifact),
                    Err(AiError::Cancelled) => {}
                    Err(e) => self.notify(format!("Generation failed: {e}")),
                }
            }
            UiEvent::AnalysisReady(result) => {
                self.inflight.finish(OP_ANALYZE);
                match result {
                    Ok(text) => self.studio.analysis = Some(text),
                    Err(e) => self.notify(format!("Analysis failed: {e}")),
                }
            }
            UiEvent::SurahsLoaded(result) => {
                self.inflight.finish(OP_SURAHS);
                match result {
                    Ok(surahs) => self.quran.surahs = surahs,
                    Err(e) => self.notify(format!("Could not load surah list: {e}")),
                }
            }
            UiEvent::SurahContentLoaded { number, result } => {
                self.inflight.finish(OP_SURAH_CONTENT);
                match result {
                    Ok(ayahs) => {
                        self.quran.reading = Some((number, ayahs));
                        self.quran.scroll = 0;
                    }
                    Err(e) => self.notify(format!("Could not load surah {number}: {e}")),
                }
            }
            UiEvent::SpeechReady(result) => {
                self.inflight.finish(OP_TTS);
                match result {
                    Ok(audio) => play_pcm(audio),
                    Err(e) => self.notify(format!("Speech failed: {e}")),
                }
            }
            UiEvent::WeatherReady(weather) => {
                self.weather = Some(weather);
            }
            UiEvent::OnboardingValidated {
                profile,
                location_ok,
            } => {
                self.inflight.finish(OP_ONBOARD);
                self.onboarding.validating = false;
                if !location_ok {
                    self.onboarding.error =
                        Some("Please enter a valid, real city and country (e.g., London, UK).".into());
                    return;
                }
                let write = self.store.set_profile(profile);
                self.store_result(write);
                self.modal = Modal::None;
                self.request_suggestions();
            }
            UiEvent::Live(event) => match event {
                LiveEvent::State(state) => {
                    self.live_state = state;
                    if state == LiveState::Idle {
                        self.live_handle = None;
                    }
                }
                LiveEvent::Error(message) => {
                    self.notify(format!("Live voice: {message}"));
                }
            },
        }
    }
}

/// Play a synthesized-speech payload (16-bit PCM at the TTS output rate).
/// Runs on its own thread; a missing output device drops the audio silently.
fn play_pcm(bytes: Vec<u8>) {
    std::thread::spawn(move || {
        use rodio::buffer::SamplesBuffer;
        use rodio::{OutputStream, Sink};

        let samples = rafiq_core::live::pcm::i16_bytes_to_f32(&bytes);
        let Ok((_stream, handle)) = OutputStream::try_default() else {
            return;
        };
        let Ok(sink) = Sink::try_new(&handle) else {
            return;
        };
        sink.append(SamplesBuffer::new(
            1,
            rafiq_core::live::session::OUTPUT_SAMPLE_RATE,
            samples,
        ));
        sink.sleep_until_end();
    });
}

/// Mime type from a file extension; the analyzer and image edit paths both
/// want one.
pub fn guess_mime(path: &str) -> String {
    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guessing_covers_the_analyzer_inputs() {
        assert_eq!(guess_mime("photo.JPG"), "image/jpeg");
        assert_eq!(guess_mime("clip.mp4"), "video/mp4");
        assert_eq!(guess_mime("recitation.wav"), "audio/wav");
        assert_eq!(guess_mime("unknown.bin"), "application/octet-stream");
    }
}

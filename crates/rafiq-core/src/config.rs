use std::path::{Path, PathBuf};

/// Runtime configuration for the core services.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory holding persisted state and logs.
    pub data_dir: PathBuf,
    /// API key for the generative endpoint. `None` means AI features are
    /// unavailable and wrappers fail with a configuration error.
    pub api_key: Option<String>,
    /// When true, no outbound AI request is ever issued.
    pub offline: bool,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            api_key: None,
            offline: false,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Default data directory: `~/.local/share/rafiq` (or platform
    /// equivalent), falling back to a relative directory when the home
    /// directory cannot be resolved.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("rafiq"))
            .unwrap_or_else(|| PathBuf::from("rafiq_data"))
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(Self::default_data_dir())
    }
}

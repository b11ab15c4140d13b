//! Application settings structs, defaults and TOML persistence.
//!
//! Only preferences are stored here.  Reading position is never saved.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::reader::{ChunkSize, FontSize, Wpm};

/// Text shown in the editor on first launch.
pub const WELCOME_TEXT: &str = "Welcome to VESTAL. Paste your text here, try fetching an article \
from Wikipedia, adjust the settings below, and click \"Start Reading\" to begin. Happy reading!";

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Wikipedia editions offered by the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    It,
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::It, Language::Ru];

    /// Subdomain / ISO-639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::It => "it",
            Language::Ru => "ru",
        }
    }

    /// Name in the language itself, for the picker.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::It => "Italiano",
            Language::Ru => "Русский",
        }
    }
}

// ---------------------------------------------------------------------------
// ReadingConfig
// ---------------------------------------------------------------------------

/// Pacing and display preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    /// Reading rate (50 – 1500).
    pub wpm: Wpm,
    /// Words per chunk (1 – 7).
    pub chunk_size: ChunkSize,
    /// Display font size in points (24 – 144).
    pub font_size: FontSize,
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Article search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Edition searched by default.
    pub language: Language,
    /// API endpoint; `{lang}` is replaced by the language code.
    pub endpoint_template: String,
    /// Seconds to wait for a response.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            endpoint_template: "https://{lang}.wikipedia.org/w/api.php".into(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner window size in logical pixels.
    pub window_size: (f32, f32),
    /// Text placed in the editor at startup.
    pub initial_text: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (900.0, 640.0),
            initial_text: WELCOME_TEXT.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use vestal::config::AppConfig;
///
/// let mut config = AppConfig::load().unwrap();
/// config.reading.wpm = vestal::reader::Wpm::new(450);
/// config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub reading: ReadingConfig,
    pub search: SearchConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load from the platform `settings.toml`, or defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.  A missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to the platform `settings.toml`, creating directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

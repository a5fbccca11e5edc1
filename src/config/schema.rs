use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calendar::CampaignStart;
use crate::model::Variant;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/advent/config.toml` or `~/.config/advent/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ADVENT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub campaign: CampaignSettings,
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
    pub storage: StorageSettings,
    pub content: ContentSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CampaignSettings {
    pub year: i32,
    /// 1-based month the calendar runs in.
    pub month: u32,
    /// Pretend today is this day index (developer clock override).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_override: Option<i32>,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        let start = CampaignStart::default();
        Self {
            year: start.year,
            month: start.month,
            today_override: None,
        }
    }
}

impl CampaignSettings {
    pub fn start(&self) -> CampaignStart {
        CampaignStart {
            year: self.year,
            month: self.month,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Variant the calendar opens on.
    pub variant: Variant,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Number of seconds to seek when pressing `[` / `]`.
    pub seek_seconds: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            variant: Variant::Light,
            shuffle: false,
            seek_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the unlocked sets are kept. Defaults to the XDG data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Keep unlocked sets in memory only.
    pub ephemeral: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentSettings {
    /// JSON file of submission rows. The CLI argument wins over this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Cover used when a row has none; `{day}` is the 1-based day.
    pub placeholder_cover: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            path: None,
            placeholder_cover: "https://picsum.photos/seed/advent{day}/400/400".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub filter: String,
    /// Log file. Defaults to `advent.log` in the storage dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

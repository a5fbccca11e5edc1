use advent::config::Settings;

/// Effective settings for this run.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// Why the defaults were used instead of the configured values.
    pub fallback: Option<String>,
}

/// Load and validate settings. A missing, unreadable or invalid config
/// never stops the calendar from opening; it runs on defaults instead.
pub fn load_settings() -> LoadedSettings {
    let loaded = settle(Settings::load().map_err(|e| e.to_string()));
    if let Some(reason) = &loaded.fallback {
        // Logging is not up yet and the terminal is still ours.
        eprintln!("advent: {reason}, using defaults");
    }
    loaded
}

pub(super) fn settle(loaded: Result<Settings, String>) -> LoadedSettings {
    let checked = loaded
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });
    match checked {
        Ok(settings) => LoadedSettings {
            settings,
            fallback: None,
        },
        Err(reason) => LoadedSettings {
            settings: Settings::default(),
            fallback: Some(reason),
        },
    }
}

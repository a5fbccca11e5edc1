use super::load::{default_config_path, default_data_dir, resolve_config_path};
use crate::model::Variant;
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_advent_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ADVENT_CONFIG_PATH", "/tmp/advent-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/advent-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("advent")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("advent")
            .join("config.toml")
    );
}

#[test]
fn default_data_dir_follows_xdg_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");
    assert_eq!(
        default_data_dir().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-data/advent")
    );

    let _g2 = EnvGuard::remove("XDG_DATA_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_data_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/share/advent")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[campaign]
year = 2026
month = 11
today_override = 6

[playback]
variant = "heavy"
shuffle = true
seek_seconds = 30

[audio]
quit_fade_out_ms = 0

[storage]
dir = "/tmp/advent-store"
ephemeral = true

[content]
path = "/tmp/rows.json"
placeholder_cover = "cover-{day}.png"

[log]
filter = "advent=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ADVENT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ADVENT__PLAYBACK__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert_eq!(s.campaign.start().year, 2026);
    assert_eq!(s.campaign.start().month, 11);
    assert_eq!(s.campaign.today_override, Some(6));
    assert_eq!(s.playback.variant, Variant::Heavy);
    assert!(s.playback.shuffle);
    assert_eq!(s.playback.seek_seconds, 30);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert!(s.storage.ephemeral);
    assert_eq!(
        s.storage_dir(),
        Some(std::path::PathBuf::from("/tmp/advent-store"))
    );
    assert_eq!(
        s.log_file(),
        Some(std::path::PathBuf::from("/tmp/advent-store/advent.log"))
    );
    assert_eq!(s.content.path, Some(std::path::PathBuf::from("/tmp/rows.json")));
    assert_eq!(s.content.placeholder_cover, "cover-{day}.png");
    assert_eq!(s.log.filter, "advent=debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
seek_seconds = 10
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ADVENT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ADVENT__PLAYBACK__SEEK_SECONDS", "3");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.seek_seconds, 3);
}

#[test]
fn missing_config_file_uses_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "ADVENT_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );

    let s = Settings::load().unwrap();
    assert_eq!(s.campaign.year, 2025);
    assert_eq!(s.campaign.month, 12);
    assert_eq!(s.playback.variant, Variant::Light);
    assert_eq!(s.playback.seek_seconds, 10);
    assert_eq!(s.log.filter, "info");
}

#[test]
fn validate_rejects_bad_month_and_zero_seek() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.campaign.month = 13;
    assert!(s.validate().unwrap_err().contains("campaign.month"));
    s.campaign.month = 0;
    assert!(s.validate().is_err());

    s.campaign.month = 12;
    s.playback.seek_seconds = 0;
    assert!(s.validate().unwrap_err().contains("seek_seconds"));
}

#[test]
fn to_toml_round_trips_through_the_loader() {
    let _lock = env_lock();
    let mut s = Settings::default();
    s.playback.variant = Variant::Heavy;
    s.campaign.today_override = Some(3);

    let rendered = s.to_toml().unwrap();
    assert!(rendered.contains("[campaign]"));
    assert!(rendered.contains(r#"variant = "heavy""#));
    assert!(!rendered.contains("dir ="));

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, rendered).unwrap();
    let _g1 = EnvGuard::set("ADVENT_CONFIG_PATH", cfg_path.to_str().unwrap());

    let loaded = Settings::load().unwrap();
    assert_eq!(loaded.playback.variant, Variant::Heavy);
    assert_eq!(loaded.campaign.today_override, Some(3));
}

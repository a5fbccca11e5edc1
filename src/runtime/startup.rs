use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use advent::audio::RodioEngine;
use advent::calendar::CalendarClock;
use advent::config::Settings;
use advent::content::{build_tracks, load_rows};
use advent::engine::MediaEngine;
use advent::model::TrackList;
use advent::sequencer::{RandomSource, ThreadRandom};
use advent::session::AdventSession;
use advent::store::{FileStore, KeyValueStore, MemoryStore};

pub type Session = AdventSession<Box<dyn KeyValueStore>, ThreadRandom, RodioEngine>;

/// Pick where the unlocked sets live.
pub fn open_store(settings: &Settings) -> Box<dyn KeyValueStore> {
    if settings.storage.ephemeral {
        info!("ephemeral storage, unlocks are not persisted");
        return Box::new(MemoryStore::default());
    }
    match settings.storage_dir() {
        Some(dir) => {
            info!(dir = %dir.display(), "persisting unlocks");
            Box::new(FileStore::new(dir))
        }
        None => {
            warn!("no storage dir (HOME unset?), unlocks are not persisted");
            Box::new(MemoryStore::default())
        }
    }
}

/// Content path from the command line, else from settings.
pub fn content_path(arg: Option<PathBuf>, settings: &Settings) -> Option<PathBuf> {
    arg.or_else(|| settings.content.path.clone())
}

pub fn load_tracks(path: &Path, settings: &Settings) -> Result<TrackList, advent::error::ContentError> {
    let rows = load_rows(path)?;
    build_tracks(&rows, &settings.content.placeholder_cover)
}

/// Apply start-up playback and clock settings to a fresh session.
pub fn apply_session_defaults<S, R, E>(
    session: AdventSession<S, R, E>,
    settings: &Settings,
) -> AdventSession<S, R, E>
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    let mut session = session.with_shuffle(settings.playback.shuffle);
    if let Some(today) = settings.campaign.today_override {
        session.override_today(Some(today));
    }
    session
}

pub fn open_session(tracks: TrackList, settings: &Settings) -> Session {
    let clock = CalendarClock::now(settings.campaign.start());
    let session = AdventSession::new(
        Arc::new(tracks),
        open_store(settings),
        clock,
        settings.playback.variant,
        ThreadRandom,
        RodioEngine::spawn(),
    );
    apply_session_defaults(session, settings)
}

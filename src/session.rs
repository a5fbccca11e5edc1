//! The calendar session: one explicit state object that owns the track
//! list, calendar, sequencer, variant lock and media engine, created once
//! at start-up and driven from a single event loop.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::adapter::VariantLock;
use crate::calendar::{CalendarClock, CalendarState};
use crate::engine::{EngineEvent, MediaEngine, MediaEvent, TransportStatus};
use crate::model::{TrackList, Variant, VariantContent};
use crate::sequencer::{PlaybackSequencer, RandomSource};
use crate::store::{KeyValueStore, UnlockStore};

/// Snapshot of the sounding track for presentation.
#[derive(Debug, Clone, Copy)]
pub struct NowPlaying<'a> {
    pub day: usize,
    /// Variant whose content is pinned to the engine.
    pub variant: Variant,
    pub content: &'a VariantContent,
    pub playing: bool,
    pub transport: &'a TransportStatus,
}

pub struct AdventSession<S, R, E> {
    tracks: Arc<TrackList>,
    calendar: CalendarState<S>,
    sequencer: PlaybackSequencer<R>,
    lock: VariantLock,
    engine: E,
    transport: TransportStatus,
    /// `(day, url)` currently handed to the engine.
    loaded: Option<(usize, String)>,
    /// Bumped on every load; events from older loads are dropped.
    generation: u64,
    engine_playing: bool,
}

impl<S, R, E> AdventSession<S, R, E>
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    pub fn new(
        tracks: Arc<TrackList>,
        store: S,
        clock: CalendarClock,
        variant: Variant,
        rng: R,
        engine: E,
    ) -> Self {
        let calendar = CalendarState::new(tracks.clone(), UnlockStore::new(store), clock, variant);
        info!(
            today = calendar.today(),
            variant = %variant,
            unlocked = calendar.unlocked().len(),
            "session started"
        );
        Self {
            tracks,
            calendar,
            sequencer: PlaybackSequencer::new(rng),
            lock: VariantLock::default(),
            engine,
            transport: TransportStatus::default(),
            loaded: None,
            generation: 0,
            engine_playing: false,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.sequencer.set_shuffle(shuffle);
        self
    }

    /// Reveal `day` under the active variant. See [`CalendarState::reveal`].
    pub fn reveal(&mut self, day: usize) -> bool {
        self.calendar.reveal(day)
    }

    /// Play `day`, or toggle it when already active. Revealing is never a
    /// side effect: only eligible days can be played, revealed or not.
    pub fn play_or_toggle(&mut self, day: usize) -> bool {
        if !self.calendar.is_eligible(day) {
            debug!(day, "play ignored: not eligible");
            return false;
        }
        self.sequencer.play_or_toggle(day);
        self.sync();
        true
    }

    pub fn pause_resume(&mut self) {
        self.sequencer.pause_resume();
        self.sync();
    }

    pub fn next(&mut self) -> Option<usize> {
        let unlocked = self.calendar.playable();
        let moved = self.sequencer.next(&unlocked);
        self.sync();
        moved
    }

    pub fn previous(&mut self) -> Option<usize> {
        let unlocked = self.calendar.playable();
        let moved = self.sequencer.previous(&unlocked);
        self.sync();
        moved
    }

    /// Seek the sounding track to `position`.
    pub fn seek(&mut self, position: Duration) {
        if self.loaded.is_none() {
            return;
        }
        let position = match self.transport.duration {
            Some(total) => position.min(total),
            None => position,
        };
        self.transport.position = position;
        self.engine.seek(position);
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let target = self.transport.seek_target(delta_secs);
        self.seek(target);
    }

    pub fn set_variant(&mut self, variant: Variant) {
        if self.calendar.set_variant(variant) {
            self.sync();
        }
    }

    pub fn toggle_variant(&mut self) {
        self.set_variant(self.calendar.variant().toggled());
    }

    pub fn toggle_shuffle(&mut self) {
        self.sequencer.toggle_shuffle();
    }

    /// Clear the active variant's unlocked days. Debug path only.
    pub fn reset_variant(&mut self) {
        self.calendar.reset(self.calendar.variant());
    }

    /// Developer clock override. See [`CalendarState::override_today`].
    pub fn override_today(&mut self, today: Option<i32>) {
        self.calendar.override_today(today);
    }

    /// Fold an engine callback in. `Ended` advances to the next day; when
    /// there is nowhere to go, playback stops. Events from a source that has
    /// since been replaced are ignored.
    pub fn handle_media_event(&mut self, event: EngineEvent) {
        if event.generation != self.generation {
            trace!(
                stale = event.generation,
                current = self.generation,
                event = ?event.event,
                "dropped event from a replaced source"
            );
            return;
        }
        match event.event {
            MediaEvent::Ended => {
                debug!(day = ?self.sequencer.active(), "track ended");
                // The engine stopped by itself; a re-pick of the same day restarts it.
                self.engine_playing = false;
                self.transport.position = Duration::ZERO;
                let unlocked = self.calendar.playable();
                if self.sequencer.next(&unlocked).is_none() && self.sequencer.is_playing() {
                    debug!("nothing to advance to, stopping");
                    self.sequencer.pause_resume();
                }
                self.sync();
            }
            other => self.transport.apply(other),
        }
    }

    /// Re-pin the playback lock and bring the engine in line with it.
    fn sync(&mut self) {
        let active = self.sequencer.active();
        let playing = self.sequencer.is_playing();
        self.lock
            .sync(active, playing, self.calendar.variant(), &self.tracks);

        let pinned = self.lock.locked().map(|l| (l.day, l.url.clone()));
        if pinned != self.loaded {
            self.transport.reset();
            self.generation += 1;
            let locator = pinned.as_ref().map(|(_, url)| url.as_str()).unwrap_or("");
            self.engine.load(self.generation, locator);
            self.loaded = pinned;
            self.engine_playing = false;
        }

        if self.engine_playing != playing {
            self.engine.set_playing(playing);
            self.engine_playing = playing;
        }
    }

    pub fn now_playing(&self) -> Option<NowPlaying<'_>> {
        let lock = self.lock.locked()?;
        let content = self.lock.content(&self.tracks)?;
        Some(NowPlaying {
            day: lock.day,
            variant: lock.variant,
            content,
            playing: self.sequencer.is_playing(),
            transport: &self.transport,
        })
    }

    /// Variant the presentation should show. See [`VariantLock::display_variant`].
    pub fn display_variant(&self) -> Variant {
        self.lock.display_variant(
            self.sequencer.active(),
            self.sequencer.is_playing(),
            self.calendar.variant(),
        )
    }

    pub fn calendar(&self) -> &CalendarState<S> {
        &self.calendar
    }

    pub fn sequencer(&self) -> &PlaybackSequencer<R> {
        &self.sequencer
    }

    /// Generation of the source currently handed to the engine.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn transport(&self) -> &TransportStatus {
        &self.transport
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

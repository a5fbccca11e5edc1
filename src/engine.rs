//! Media engine boundary.
//!
//! The engine decodes and outputs audio; the core only tells it what to
//! load, whether to play and where to seek, and consumes the events it
//! reports back. Engines swallow their own failures: an unplayable locator
//! is "nothing to play", not an error.
//!
//! Every load carries a generation. Events are stamped with the generation
//! of the load they came from, so the core can drop whatever a replaced
//! source still had in flight.

use std::time::Duration;

use tracing::trace;

/// Commands the core issues to whatever produces sound.
pub trait MediaEngine {
    /// Replace the current source. An empty locator clears it. Events for
    /// this source must carry `generation`.
    fn load(&mut self, generation: u64, locator: &str);
    fn set_playing(&mut self, playing: bool);
    fn seek(&mut self, position: Duration);
}

impl<T: MediaEngine + ?Sized> MediaEngine for Box<T> {
    fn load(&mut self, generation: u64, locator: &str) {
        (**self).load(generation, locator)
    }

    fn set_playing(&mut self, playing: bool) {
        (**self).set_playing(playing)
    }

    fn seek(&mut self, position: Duration) {
        (**self).seek(position)
    }
}

/// Callbacks reported by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Elapsed time of the current source.
    Progress(Duration),
    DurationKnown(Duration),
    /// The current source played to its end.
    Ended,
    BufferingStarted,
    BufferingFinished,
}

/// A [`MediaEvent`] stamped with the generation of the load it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineEvent {
    pub generation: u64,
    pub event: MediaEvent,
}

impl EngineEvent {
    pub fn new(generation: u64, event: MediaEvent) -> Self {
        Self { generation, event }
    }
}

/// Progress shown for the sounding track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportStatus {
    pub position: Duration,
    pub duration: Option<Duration>,
    pub buffering: bool,
}

impl TransportStatus {
    /// Forget everything about the previous source.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold an engine event in. `Ended` is left to the caller.
    pub fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Progress(p) => self.position = p,
            MediaEvent::DurationKnown(d) => self.duration = Some(d),
            MediaEvent::BufferingStarted => self.buffering = true,
            MediaEvent::BufferingFinished => self.buffering = false,
            MediaEvent::Ended => {}
        }
    }

    /// Elapsed fraction in `0.0..=1.0`, when the duration is known.
    pub fn fraction(&self) -> Option<f64> {
        let total = self.duration?.as_secs_f64();
        if total <= 0.0 {
            return None;
        }
        Some((self.position.as_secs_f64() / total).clamp(0.0, 1.0))
    }

    /// Target for a relative seek, kept inside `0..=duration`.
    pub fn seek_target(&self, delta_secs: i64) -> Duration {
        let cur = i64::try_from(self.position.as_secs()).unwrap_or(i64::MAX);
        let mut target = Duration::from_secs(cur.saturating_add(delta_secs).max(0) as u64);
        if let Some(total) = self.duration {
            target = target.min(total);
        }
        target
    }
}

/// An engine that plays nothing and only remembers what it was given.
#[derive(Debug, Default)]
pub struct NullEngine {
    loaded: Option<String>,
    generation: u64,
}

impl NullEngine {
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Generation of the last load.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl MediaEngine for NullEngine {
    fn load(&mut self, generation: u64, locator: &str) {
        trace!(generation, locator, "null engine load");
        self.generation = generation;
        self.loaded = Some(locator.to_string()).filter(|l| !l.is_empty());
    }

    fn set_playing(&mut self, _playing: bool) {}

    fn seek(&mut self, _position: Duration) {}
}

//! Play-time bookkeeping for the current source, kept apart from the sink
//! so it can be reasoned about with explicit instants.

use std::time::{Duration, Instant};

/// Time played so far: what was banked before the last pause plus the run
/// since the last resume.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct Elapsed {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Elapsed {
    pub(super) fn at(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }

    pub(super) fn resume(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(super) fn pause(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st);
        }
    }

    /// Start counting again from `at`, e.g. after a seek rebuilt the sink.
    pub(super) fn restart_at(&mut self, at: Duration, running: bool, now: Instant) {
        self.accumulated = at;
        self.started_at = running.then_some(now);
    }

    pub(super) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What a play/pause request does to the current source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Toggle {
    /// Already in the requested state, or nothing to act on.
    Ignore,
    /// The source played out: reopen it from the start.
    Restart,
    Play,
    Pause,
}

pub(super) fn toggle(playing: bool, wanted: bool, has_sink: bool, finished: bool) -> Toggle {
    if playing == wanted {
        return Toggle::Ignore;
    }
    if wanted && finished {
        return Toggle::Restart;
    }
    match (has_sink, wanted) {
        (false, _) => Toggle::Ignore,
        (true, true) => Toggle::Play,
        (true, false) => Toggle::Pause,
    }
}

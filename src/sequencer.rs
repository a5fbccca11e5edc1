//! Playback sequencer: which day is sounding, whether it plays, and how
//! next/previous move over the unlocked days.
//!
//! The sequencer only holds intent. Decoding belongs to a
//! [`MediaEngine`](crate::engine::MediaEngine) driven by the session.

mod random;

pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};

use std::collections::BTreeSet;

use tracing::debug;

/// Active day, play state and shuffle flag.
#[derive(Debug)]
pub struct PlaybackSequencer<R> {
    active: Option<usize>,
    playing: bool,
    shuffle: bool,
    rng: R,
}

impl<R: RandomSource> PlaybackSequencer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            active: None,
            playing: false,
            shuffle: false,
            rng,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    /// Toggle play state for the active day, or make `day` active and play it.
    pub fn play_or_toggle(&mut self, day: usize) {
        if self.active == Some(day) {
            self.playing = !self.playing;
        } else {
            self.active = Some(day);
            self.playing = true;
        }
        debug!(day, playing = self.playing, "play or toggle");
    }

    /// Toggle play state without changing the active day.
    pub fn pause_resume(&mut self) {
        if self.active.is_some() {
            self.playing = !self.playing;
        }
    }

    /// Advance over `unlocked` (ascending).
    ///
    /// Sequential until the last unlocked day; stepping past it turns
    /// shuffle on and picks a random other day. Returns the new active day,
    /// or `None` when there was nothing to move over.
    pub fn next(&mut self, unlocked: &BTreeSet<usize>) -> Option<usize> {
        let current = self.active?;
        let order: Vec<usize> = unlocked.iter().copied().collect();
        if order.is_empty() {
            return None;
        }

        let target = if self.shuffle {
            self.pick_other(&order, current)
        } else {
            match order.iter().position(|&d| d == current) {
                None => order[0],
                Some(p) if p + 1 == order.len() => {
                    debug!(day = current, "end of unlocked days, enabling shuffle");
                    self.shuffle = true;
                    self.pick_other(&order, current)
                }
                Some(p) => order[p + 1],
            }
        };

        self.activate(target);
        Some(target)
    }

    /// Step back over `unlocked` (ascending), wrapping to the last day.
    /// Shuffle never applies here.
    pub fn previous(&mut self, unlocked: &BTreeSet<usize>) -> Option<usize> {
        let current = self.active?;
        let order: Vec<usize> = unlocked.iter().copied().collect();
        if order.is_empty() {
            return None;
        }

        let target = match order.iter().position(|&d| d == current) {
            None => order[order.len() - 1],
            Some(p) => order[(p + order.len() - 1) % order.len()],
        };

        self.activate(target);
        Some(target)
    }

    /// Uniform pick from `order` without `current`; the first day when
    /// nothing else is left.
    fn pick_other(&mut self, order: &[usize], current: usize) -> usize {
        let others: Vec<usize> = order.iter().copied().filter(|&d| d != current).collect();
        if others.is_empty() {
            return order[0];
        }
        let i = self.rng.pick(others.len()).min(others.len() - 1);
        others[i]
    }

    fn activate(&mut self, day: usize) {
        debug!(from = ?self.active, to = day, shuffle = self.shuffle, "sequencer moved");
        self.active = Some(day);
        self.playing = true;
    }
}

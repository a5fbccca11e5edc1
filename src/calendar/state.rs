use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::model::{TrackList, Variant};
use crate::store::{KeyValueStore, UnlockState, UnlockStore};

use super::clock::CalendarClock;

/// What a single cell looks like right now.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellState {
    /// Beyond today's index, or a placeholder day.
    Inactive,
    /// Open today but not revealed under the active variant.
    Locked,
    Unlocked,
}

/// Eligibility and unlock bookkeeping for the active variant.
pub struct CalendarState<S> {
    tracks: Arc<TrackList>,
    store: UnlockStore<S>,
    unlocked: UnlockState,
    variant: Variant,
    clock: CalendarClock,
    clock_override: Option<CalendarClock>,
}

impl<S: KeyValueStore> CalendarState<S> {
    /// Load the persisted unlocked sets and start on `variant`.
    pub fn new(
        tracks: Arc<TrackList>,
        store: UnlockStore<S>,
        clock: CalendarClock,
        variant: Variant,
    ) -> Self {
        let unlocked = store.load();
        debug!(
            today = clock.today(),
            light = unlocked.light.len(),
            heavy = unlocked.heavy.len(),
            "calendar loaded"
        );
        Self {
            tracks,
            store,
            unlocked,
            variant,
            clock,
            clock_override: None,
        }
    }

    fn effective_clock(&self) -> CalendarClock {
        self.clock_override.unwrap_or(self.clock)
    }

    /// Today's index, `-1` before the campaign.
    pub fn today(&self) -> i32 {
        self.effective_clock().today()
    }

    pub fn is_eligible(&self, day: usize) -> bool {
        self.effective_clock().is_open(day) && self.tracks.is_enabled(day)
    }

    /// Membership in the active variant's unlocked set.
    pub fn is_unlocked(&self, day: usize) -> bool {
        self.unlocked.contains(self.variant, day)
    }

    pub fn cell_state(&self, day: usize) -> CellState {
        if !self.is_eligible(day) {
            CellState::Inactive
        } else if self.is_unlocked(day) {
            CellState::Unlocked
        } else {
            CellState::Locked
        }
    }

    /// Unlock `day` for the active variant and persist.
    ///
    /// No-op for ineligible or already unlocked days. Returns whether the
    /// unlocked set changed.
    pub fn reveal(&mut self, day: usize) -> bool {
        if !self.is_eligible(day) {
            debug!(day, today = self.today(), "reveal ignored: not eligible");
            return false;
        }
        if !self.unlocked.insert(self.variant, day) {
            return false;
        }
        debug!(day, variant = %self.variant, "revealed");
        self.store.save(&self.unlocked);
        true
    }

    /// The active variant's unlocked set as stored.
    pub fn unlocked(&self) -> &BTreeSet<usize> {
        self.unlocked.unlocked(self.variant)
    }

    /// Unlocked days that are still eligible: what playback navigates over.
    pub fn playable(&self) -> BTreeSet<usize> {
        self.unlocked()
            .iter()
            .copied()
            .filter(|&d| self.is_eligible(d))
            .collect()
    }

    pub fn unlock_state(&self) -> &UnlockState {
        &self.unlocked
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns true when the variant actually changed.
    pub fn set_variant(&mut self, variant: Variant) -> bool {
        if self.variant == variant {
            return false;
        }
        debug!(from = %self.variant, to = %variant, "variant switched");
        self.variant = variant;
        true
    }

    /// Clear every unlocked day of `variant`. Debug path only.
    pub fn reset(&mut self, variant: Variant) {
        if self.unlocked.clear(variant) {
            info!(variant = %variant, "unlocked set reset");
            self.store.save(&self.unlocked);
        }
    }

    /// Replace the clock with a developer override, or restore the start-up
    /// clock with `None`. Only one override is active at a time.
    pub fn override_today(&mut self, today: Option<i32>) {
        self.clock_override = today.map(CalendarClock::fixed);
        info!(today = self.today(), overridden = today.is_some(), "calendar clock set");
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn store_transport(&self) -> &S {
        self.store.transport()
    }
}

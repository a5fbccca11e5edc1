//! Variant-locked playback.
//!
//! Switching the global mood while a track is sounding must not swap the
//! source out from under it. The lock pins `(day, variant, url)` when a day
//! becomes active and only follows the live variant while paused.

use tracing::debug;

use crate::model::{TrackList, Variant, VariantContent};

/// What the engine is (or would be) playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedPlayback {
    pub day: usize,
    pub variant: Variant,
    pub url: String,
}

#[derive(Debug, Default)]
pub struct VariantLock {
    locked: Option<LockedPlayback>,
}

impl VariantLock {
    pub fn locked(&self) -> Option<&LockedPlayback> {
        self.locked.as_ref()
    }

    /// Bring the lock in line with the current playback state.
    ///
    /// - a different (or first) active day re-locks to the live variant
    /// - no active day drops the lock
    /// - while paused, a live variant or url that differs refreshes the lock
    /// - while playing, variant changes are ignored
    pub fn sync(
        &mut self,
        active: Option<usize>,
        playing: bool,
        live: Variant,
        tracks: &TrackList,
    ) {
        let Some(day) = active else {
            self.locked = None;
            return;
        };
        let live_url = tracks
            .get(day)
            .map(|t| t.content(live).media_url.clone())
            .unwrap_or_default();

        let relock = match &self.locked {
            None => true,
            Some(lock) if lock.day != day => true,
            Some(lock) => !playing && (lock.variant != live || lock.url != live_url),
        };

        if relock {
            debug!(day, variant = %live, "playback locked");
            self.locked = Some(LockedPlayback {
                day,
                variant: live,
                url: live_url,
            });
        }
    }

    /// Variant to present: the pinned one while its day is actively
    /// playing, the live one otherwise.
    pub fn display_variant(&self, active: Option<usize>, playing: bool, live: Variant) -> Variant {
        match &self.locked {
            Some(lock) if playing && active == Some(lock.day) => lock.variant,
            _ => live,
        }
    }

    /// Pinned content (url, cover, credits) for display and the engine.
    pub fn content<'a>(&self, tracks: &'a TrackList) -> Option<&'a VariantContent> {
        let lock = self.locked.as_ref()?;
        tracks.get(lock.day).map(|t| t.content(lock.variant))
    }
}

#[cfg(test)]
mod tests;

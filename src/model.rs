//! Calendar content types: variants, per-variant content and the fixed
//! 25-track list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TrackListError;

/// Number of cells in the calendar.
pub const DAY_COUNT: usize = 25;

/// Mood variant. Every day carries one piece of content per variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Light,
    Heavy,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Light, Variant::Heavy];

    /// The other variant.
    pub fn toggled(self) -> Self {
        match self {
            Variant::Light => Variant::Heavy,
            Variant::Heavy => Variant::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Light => "light",
            Variant::Heavy => "heavy",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a day exposes for one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantContent {
    /// Playable media locator. May be empty.
    pub media_url: String,
    pub cover_image: String,
    pub description: String,
    pub credited_to: String,
    pub buy_link: Option<String>,
    pub artist_name: Option<String>,
    pub track_name: Option<String>,
}

impl VariantContent {
    pub fn with_media(url: impl Into<String>) -> Self {
        Self {
            media_url: url.into(),
            ..Self::default()
        }
    }

    pub fn has_media(&self) -> bool {
        !self.media_url.trim().is_empty()
    }

    /// "Artist - Track" when both names are known, whichever is present
    /// otherwise, falling back to the credited contributor.
    pub fn display_title(&self) -> String {
        let artist = self.artist_name.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let track = self.track_name.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match (artist, track) {
            (Some(a), Some(t)) => format!("{a} - {t}"),
            (Some(a), None) => a.to_string(),
            (None, Some(t)) => t.to_string(),
            (None, None) => self.credited_to.trim().to_string(),
        }
    }
}

/// One calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub day_index: usize,
    pub light: VariantContent,
    pub heavy: VariantContent,
    /// Participant profile link, shared by both variants.
    pub profile_link: Option<String>,
    /// Placeholder day: never revealed, never played.
    pub disabled: bool,
}

impl Track {
    pub fn new(day_index: usize, light: VariantContent, heavy: VariantContent) -> Self {
        Self {
            day_index,
            light,
            heavy,
            profile_link: None,
            disabled: false,
        }
    }

    /// A disabled day with no content.
    pub fn placeholder(day_index: usize) -> Self {
        Self {
            disabled: true,
            ..Self::new(day_index, VariantContent::default(), VariantContent::default())
        }
    }

    pub fn content(&self, variant: Variant) -> &VariantContent {
        match variant {
            Variant::Light => &self.light,
            Variant::Heavy => &self.heavy,
        }
    }
}

/// Exactly [`DAY_COUNT`] tracks, where `tracks[i].day_index == i`.
///
/// Built once at load time and shared read-only for the whole session.
#[derive(Debug, Clone)]
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    pub fn new(mut tracks: Vec<Track>) -> Result<Self, TrackListError> {
        if tracks.len() != DAY_COUNT {
            return Err(TrackListError::WrongLength(tracks.len()));
        }
        tracks.sort_by_key(|t| t.day_index);
        for (position, t) in tracks.iter().enumerate() {
            if t.day_index != position {
                return Err(TrackListError::OutOfOrder {
                    position,
                    day_index: t.day_index,
                });
            }
        }
        Ok(Self { tracks })
    }

    pub fn get(&self, day: usize) -> Option<&Track> {
        self.tracks.get(day)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// True when `day` exists and is not a placeholder.
    pub fn is_enabled(&self, day: usize) -> bool {
        self.get(day).is_some_and(|t| !t.disabled)
    }
}

//! Error types for the fallible edges of the crate: building the track
//! list, loading content rows, talking to the persistence transport and
//! opening audio files.
//!
//! The calendar and playback state machines themselves never fail; bad
//! input there is normalized away instead of reported.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a set of tracks cannot form a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackListError {
    #[error("expected 25 tracks, got {0}")]
    WrongLength(usize),

    #[error("track at position {position} has day index {day_index}")]
    OutOfOrder { position: usize, day_index: usize },
}

/// Persistence transport errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content resolution errors.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content rows: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no content rows")]
    NoRows,

    #[error(transparent)]
    TrackList(#[from] TrackListError),
}

/// Failures opening a local source for playback. Never leave the audio
/// thread; they are logged and the source is treated as silent.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

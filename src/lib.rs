//! advent - a 25-day reveal calendar with a single global player.
//!
//! Cells unlock day by day; revealing a cell adds it to a persisted
//! per-variant unlocked set, and one player sequences playback over the
//! revealed cells only.
//!
//! The library is split the same way the runtime uses it:
//! - [`store`]: the persisted unlocked sets (`light` / `heavy`)
//! - [`calendar`]: campaign clock, eligibility and `reveal`
//! - [`sequencer`]: active cell, play/pause, next/previous and shuffle
//! - [`adapter`]: keeps the sounding source pinned across variant switches
//! - [`session`]: one state object that wires the above to a [`engine::MediaEngine`]
//!
//! ```rust
//! use std::sync::Arc;
//! use advent::calendar::CalendarClock;
//! use advent::engine::NullEngine;
//! use advent::model::{Track, TrackList, Variant, VariantContent};
//! use advent::sequencer::ScriptedRandom;
//! use advent::session::AdventSession;
//! use advent::store::MemoryStore;
//!
//! let tracks = (0..25)
//!     .map(|d| {
//!         Track::new(
//!             d,
//!             VariantContent::with_media(format!("light-{d}.mp3")),
//!             VariantContent::with_media(format!("heavy-{d}.mp3")),
//!         )
//!     })
//!     .collect();
//! let tracks = TrackList::new(tracks).unwrap();
//! let mut session = AdventSession::new(
//!     Arc::new(tracks),
//!     MemoryStore::default(),
//!     CalendarClock::fixed(4),
//!     Variant::Light,
//!     ScriptedRandom::new(vec![0]),
//!     NullEngine::default(),
//! );
//!
//! session.reveal(2);
//! session.play_or_toggle(2);
//! assert_eq!(session.now_playing().map(|n| n.day), Some(2));
//! ```

pub mod adapter;
pub mod audio;
pub mod calendar;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod model;
pub mod sequencer;
pub mod session;
pub mod store;

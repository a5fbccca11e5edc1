//! Audio playback module.
//!
//! This module exposes the `RodioEngine` and internal helpers used to
//! decode local files, seek and report progress back to the session.

mod elapsed;
mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioEngine;
pub use sink::resolve_locator;

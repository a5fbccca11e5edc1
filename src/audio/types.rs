//! Commands understood by the audio thread.

use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source. Empty or remote locators clear it.
    /// Events for the new source carry `generation`.
    Load { generation: u64, locator: String },
    /// Play or pause the current source.
    SetPlaying(bool),
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

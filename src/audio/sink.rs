//! Opening local sources as `rodio` sinks.
//!
//! Locators are whatever the content rows carry. Only local paths and
//! `file://` urls are playable here; everything else is "nothing to play".

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::AudioError;

/// Map a media locator to a local file path, if it is one.
pub fn resolve_locator(locator: &str) -> Option<PathBuf> {
    let locator = locator.trim();
    if locator.is_empty() {
        return None;
    }
    if let Some(path) = locator.strip_prefix("file://") {
        return (!path.is_empty()).then(|| PathBuf::from(path));
    }
    if locator.contains("://") {
        return None;
    }
    Some(PathBuf::from(locator))
}

/// Track length from the file's tags, when lofty can read them.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    Some(tagged.properties().duration()).filter(|d| !d.is_zero())
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the decoder's own idea of the total duration.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();
    // `skip_duration` is the seeking primitive; Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}

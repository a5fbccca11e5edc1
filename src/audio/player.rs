use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::engine::{EngineEvent, MediaEngine};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// [`MediaEngine`] backed by `rodio` on a dedicated audio thread.
///
/// Commands go in over one channel; [`EngineEvent`]s come back over another
/// and are drained by the caller's event loop with [`RodioEngine::try_event`].
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    events: Receiver<EngineEvent>,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, events) = mpsc::channel::<EngineEvent>();
        let join = spawn_audio_thread(rx, event_tx);
        Self {
            tx,
            events,
            join: Some(join),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone");
        }
    }

    /// Next pending event, without blocking.
    pub fn try_event(&self) -> Option<EngineEvent> {
        self.events.try_recv().ok()
    }

    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl MediaEngine for RodioEngine {
    fn load(&mut self, generation: u64, locator: &str) {
        self.send(AudioCmd::Load {
            generation,
            locator: locator.to_string(),
        });
    }

    fn set_playing(&mut self, playing: bool) {
        self.send(AudioCmd::SetPlaying(playing));
    }

    fn seek(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(position));
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.quit_softly(Duration::ZERO);
        }
    }
}

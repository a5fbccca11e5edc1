use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::engine::{EngineEvent, MediaEvent};

use super::elapsed::{Elapsed, Toggle, toggle};
use super::sink::{create_sink_at, probe_duration, resolve_locator};
use super::types::AudioCmd;

const TICK: Duration = Duration::from_millis(200);

/// State of the one source the thread is responsible for.
#[derive(Default)]
struct Current {
    path: Option<PathBuf>,
    sink: Option<Sink>,
    playing: bool,
    elapsed: Elapsed,
    /// Stamp for every event about this source.
    generation: u64,
}

impl Current {
    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.playing = false;
        self.elapsed.clear();
    }

    /// Rebuild the sink at `at`, keeping the play/pause state.
    fn open_at(&mut self, stream: &OutputStream, at: Duration) -> Option<Duration> {
        let path = self.path.clone()?;
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        match create_sink_at(stream, &path, at) {
            Ok((sink, total)) => {
                if self.playing {
                    sink.play();
                }
                self.sink = Some(sink);
                self.elapsed.restart_at(at, self.playing, Instant::now());
                total
            }
            Err(e) => {
                warn!(error = %e, "source unavailable");
                self.path = None;
                self.playing = false;
                self.elapsed.clear();
                None
            }
        }
    }

    fn set_playing(&mut self, stream: &OutputStream, playing: bool) {
        let finished = self.sink.as_ref().is_some_and(Sink::empty);
        match toggle(self.playing, playing, self.sink.is_some(), finished) {
            Toggle::Ignore => {}
            Toggle::Restart => {
                self.playing = true;
                self.open_at(stream, Duration::ZERO);
            }
            Toggle::Play => {
                if let Some(sink) = self.sink.as_ref() {
                    sink.play();
                }
                self.elapsed.resume(Instant::now());
                self.playing = true;
            }
            Toggle::Pause => {
                if let Some(sink) = self.sink.as_ref() {
                    sink.pause();
                }
                self.elapsed.pause(Instant::now());
                self.playing = false;
            }
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "no audio output device, playback is silent");
                drain_without_output(rx);
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let emit = |generation: u64, event: MediaEvent| {
            let _ = events.send(EngineEvent::new(generation, event));
        };
        let mut current = Current::default();

        loop {
            match rx.recv_timeout(TICK) {
                Ok(AudioCmd::Load {
                    generation,
                    locator,
                }) => {
                    current.stop();
                    current.generation = generation;
                    current.path = resolve_locator(&locator);
                    let Some(path) = current.path.clone() else {
                        if locator.trim().is_empty() {
                            debug!("source cleared");
                        } else {
                            warn!(locator = %locator, "not a local file, nothing to play");
                        }
                        continue;
                    };

                    emit(generation, MediaEvent::BufferingStarted);
                    let decoded_total = current.open_at(&stream, Duration::ZERO);
                    if current.path.is_some() {
                        debug!(path = %path.display(), "source loaded");
                        if let Some(total) = probe_duration(&path).or(decoded_total) {
                            emit(generation, MediaEvent::DurationKnown(total));
                        }
                    }
                    emit(generation, MediaEvent::BufferingFinished);
                }

                Ok(AudioCmd::SetPlaying(playing)) => {
                    current.set_playing(&stream, playing);
                }

                Ok(AudioCmd::Seek(position)) => {
                    if current.sink.is_none() {
                        continue;
                    }
                    // Scrubbing: rebuild the current sink and skip into the file.
                    current.open_at(&stream, position);
                    emit(current.generation, MediaEvent::Progress(position));
                }

                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some(ref s) = current.sink {
                        fade_out_sink(s, fade_out_ms);
                        s.stop();
                    }
                    info!("audio thread stopped");
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    if !current.playing {
                        continue;
                    }
                    let Some(ref s) = current.sink else {
                        continue;
                    };
                    let now = Instant::now();
                    if s.empty() {
                        current.elapsed.pause(now);
                        current.playing = false;
                        debug!(elapsed = ?current.elapsed.at(now), "source ended");
                        emit(current.generation, MediaEvent::Ended);
                    } else {
                        emit(current.generation, MediaEvent::Progress(current.elapsed.at(now)));
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Keep the command channel alive without an output device.
fn drain_without_output(rx: Receiver<AudioCmd>) {
    for cmd in rx {
        if let AudioCmd::Quit { .. } = cmd {
            break;
        }
    }
}

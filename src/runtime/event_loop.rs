use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use advent::calendar::CellState;
use advent::config::Settings;
use advent::engine::MediaEngine;
use advent::sequencer::RandomSource;
use advent::session::AdventSession;
use advent::store::KeyValueStore;

use crate::app::App;
use crate::runtime::startup::Session;
use crate::ui;

/// Main terminal event loop: drains engine events, draws and handles input.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    app: &mut App,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Some(ev) = session.engine().try_event() {
            session.handle_media_event(ev);
        }
        follow_playback(app, session);

        terminal.draw(|f| ui::draw(f, app, session, settings))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session) {
                    break;
                }
            }
        }
    }

    session
        .engine_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    Ok(())
}

/// Keep the cursor on the active day while following playback.
pub fn follow_playback<S, R, E>(app: &mut App, session: &AdventSession<S, R, E>)
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    if !app.follow_playback {
        return;
    }
    if let Some(day) = session.sequencer().active() {
        app.set_cursor(day);
    }
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub fn handle_key_event<S, R, E>(
    key: KeyEvent,
    settings: &Settings,
    app: &mut App,
    session: &mut AdventSession<S, R, E>,
) -> bool
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    let day = app.cursor();
    let label = day + 1;
    match key.code {
        KeyCode::Char('q') => return true,

        KeyCode::Left | KeyCode::Char('h') => {
            app.follow_playback = false;
            app.left();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.follow_playback = false;
            app.right();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.follow_playback = false;
            app.up();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.follow_playback = false;
            app.down();
        }

        KeyCode::Enter => match session.calendar().cell_state(day) {
            CellState::Inactive => app.set_status(format!("Day {label} is not open yet")),
            CellState::Unlocked => app.set_status(format!("Day {label} is already revealed")),
            CellState::Locked => {
                session.reveal(day);
                app.set_status(format!("Day {label} revealed"));
            }
        },

        KeyCode::Char('p') => {
            if session.play_or_toggle(day) {
                app.follow_playback = true;
                app.clear_status();
            } else {
                app.set_status(format!("Day {label} is not open yet"));
            }
        }
        KeyCode::Char(' ') => session.pause_resume(),
        KeyCode::Char('n') => step(app, session.next()),
        KeyCode::Char('N') => step(app, session.previous()),

        KeyCode::Char('v') => {
            session.toggle_variant();
            app.set_status(format!("Variant: {}", session.calendar().variant()));
        }
        KeyCode::Char('s') => {
            session.toggle_shuffle();
            let on = session.sequencer().shuffle_enabled();
            app.set_status(format!("Shuffle: {}", if on { "ON" } else { "OFF" }));
        }
        KeyCode::Char(']') => session.seek_by(seek_secs(settings)),
        KeyCode::Char('[') => session.seek_by(-seek_secs(settings)),
        KeyCode::Char('R') => {
            session.reset_variant();
            app.set_status(format!("Cleared {} unlocks", session.calendar().variant()));
        }
        other => debug!(key = ?other, "unbound key"),
    }
    false
}

fn step(app: &mut App, moved: Option<usize>) {
    match moved {
        Some(_) => {
            app.follow_playback = true;
            app.clear_status();
        }
        None => app.set_status("Nothing to skip to: play a revealed day first"),
    }
}

fn seek_secs(settings: &Settings) -> i64 {
    settings.playback.seek_seconds.min(i64::MAX as u64) as i64
}

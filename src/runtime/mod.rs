use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;

mod event_loop;
mod logging;
mod settings;
mod startup;


const USAGE: &str = "usage: advent [--print-config] [CONTENT_JSON]";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run { content: Option<PathBuf> },
    PrintConfig,
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Command {
    let mut content = None;
    for arg in args {
        match arg.as_str() {
            "--print-config" => return Command::PrintConfig,
            "-h" | "--help" => return Command::Help,
            _ => content = Some(PathBuf::from(arg)),
        }
    }
    Command::Run { content }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings::LoadedSettings { settings, fallback } = settings::load_settings();

    let content_arg = match parse_args(env::args().skip(1)) {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::PrintConfig => {
            print!("{}", settings.to_toml()?);
            return Ok(());
        }
        Command::Run { content } => content,
    };

    let Some(content) = startup::content_path(content_arg, &settings) else {
        return Err(format!("no content file given\n{USAGE}").into());
    };
    let tracks = startup::load_tracks(&content, &settings)?;

    logging::init_logging(&settings);
    if let Some(reason) = fallback {
        warn!(%reason, "running on default settings");
    }
    info!(content = %content.display(), "starting");

    let mut session = startup::open_session(tracks, &settings);
    let mut app = App::new();
    event_loop::follow_playback(&mut app, &session);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    run_result
}

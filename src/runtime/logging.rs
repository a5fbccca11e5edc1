use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use advent::config::Settings;

/// Install a file-backed `tracing` subscriber. The terminal belongs to the
/// UI, so logs never go to stdout/stderr once it is up.
///
/// Without a writable log file the app runs unlogged.
pub fn init_logging(settings: &Settings) {
    let Some(path) = settings.log_file() else {
        eprintln!("advent: no log file location, logging disabled");
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("advent: cannot create {}: {e}, logging disabled", parent.display());
            return;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("advent: cannot open {}: {e}, logging disabled", path.display());
            return;
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let init = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file))
                .with_filter(env_filter),
        )
        .try_init();
    if let Err(e) = init {
        eprintln!("advent: failed to install logger: {e}");
    }
}

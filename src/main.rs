//! advent: a terminal front-end for the reveal calendar.
//!
//! Run with a JSON export of the submission rows:
//! `advent rows.json`. `advent --print-config` shows the effective settings.

mod app;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}

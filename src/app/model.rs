//! Application model: the grid cursor and the transient status line.
//!
//! Calendar and playback state live in the library session; `App` only
//! holds what the terminal front-end needs on top of it.

use advent::model::DAY_COUNT;

/// Cells per grid row.
pub const GRID_COLUMNS: usize = 5;

/// The front-end model.
#[derive(Debug)]
pub struct App {
    cursor: usize,
    status: Option<String>,
    /// Move the cursor along with the playing day.
    pub follow_playback: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            status: None,
            follow_playback: true,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Put the cursor on `day`, ignoring days off the grid.
    pub fn set_cursor(&mut self, day: usize) {
        if day < DAY_COUNT {
            self.cursor = day;
        }
    }

    /// Move one cell left, stopping at the first day.
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move one cell right, stopping at the last day.
    pub fn right(&mut self) {
        if self.cursor + 1 < DAY_COUNT {
            self.cursor += 1;
        }
    }

    pub fn up(&mut self) {
        if self.cursor >= GRID_COLUMNS {
            self.cursor -= GRID_COLUMNS;
        }
    }

    pub fn down(&mut self) {
        if self.cursor + GRID_COLUMNS < DAY_COUNT {
            self.cursor += GRID_COLUMNS;
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

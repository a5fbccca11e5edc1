//! Calendar state: which days are open today, which are unlocked, and the
//! `reveal` transition between them.
//!
//! Per cell: `Inactive -> Locked -> Unlocked`. A cell leaves `Inactive`
//! when the clock reaches it; `reveal` moves it to `Unlocked`, which is
//! terminal for the active variant unless that variant is reset.

mod clock;
mod state;

pub use clock::{CalendarClock, CampaignStart, LAST_DAY, compute_today_index};
pub use state::{CalendarState, CellState};

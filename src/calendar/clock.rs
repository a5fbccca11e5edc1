use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::DAY_COUNT;

/// Highest day index.
pub const LAST_DAY: i32 = DAY_COUNT as i32 - 1;

/// The month the calendar runs in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStart {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl Default for CampaignStart {
    fn default() -> Self {
        Self {
            year: 2025,
            month: 12,
        }
    }
}

/// Today's day index relative to the campaign month.
///
/// `-1` before the campaign month, [`LAST_DAY`] after it, otherwise
/// `min(LAST_DAY, day_of_month - 1)`.
pub fn compute_today_index(now: NaiveDate, start: CampaignStart) -> i32 {
    let current = (now.year(), now.month());
    let campaign = (start.year, start.month);

    if current < campaign {
        return -1;
    }
    if current > campaign {
        return LAST_DAY;
    }
    (now.day() as i32 - 1).min(LAST_DAY)
}

/// The highest day index that may be revealed. Computed once and then
/// frozen for the lifetime of a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CalendarClock {
    today: i32,
}

impl CalendarClock {
    pub fn at(now: NaiveDate, start: CampaignStart) -> Self {
        Self {
            today: compute_today_index(now, start),
        }
    }

    /// Clock for the local wall-clock date.
    pub fn now(start: CampaignStart) -> Self {
        Self::at(Local::now().date_naive(), start)
    }

    /// A clock pinned to `today`, clamped to `-1..=LAST_DAY`.
    pub fn fixed(today: i32) -> Self {
        Self {
            today: today.clamp(-1, LAST_DAY),
        }
    }

    pub fn today(&self) -> i32 {
        self.today
    }

    pub fn is_open(&self, day: usize) -> bool {
        i64::try_from(day).is_ok_and(|d| d <= i64::from(self.today))
    }
}

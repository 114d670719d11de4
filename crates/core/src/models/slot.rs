use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::interval::Interval;

/// A range in which nobody is busy, long enough to hold the requested meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    /// True when the slot shares no instant with `busy`.
    pub fn is_clear_of(&self, busy: &Interval) -> bool {
        self.end <= busy.start() || self.start >= busy.end()
    }
}

impl From<Interval> for FreeSlot {
    fn from(interval: Interval) -> Self {
        FreeSlot::new(interval.start(), interval.end())
    }
}

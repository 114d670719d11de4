use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};

/// A half-open busy range `[start, end)` on the absolute UTC timeline.
///
/// Construction is the only way in, so every `Interval` in circulation has
/// `start < end`. Ordering is by start, then by end, which puts the shorter of
/// two same-start intervals first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "BusyEvent")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Builds an interval, rejecting zero and negative durations.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleResult<Self> {
        if end <= start {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds an interval from a start and a strictly positive length.
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> ScheduleResult<Self> {
        let end = start.checked_add_signed(length).ok_or_else(|| {
            ScheduleError::Validation(format!("{start} plus {length} is out of range"))
        })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Two half-open intervals overlap iff each starts before the other ends.
    /// Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Same start, end pushed out to `end` if that is later. Never shrinks,
    /// so `start < end` still holds.
    pub(crate) fn stretched_to(self, end: DateTime<Utc>) -> Self {
        Self {
            start: self.start,
            end: self.end.max(end),
        }
    }

    /// Intersection with `[start, end)`, or `None` when nothing is left.
    pub fn clip(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Interval> {
        let clipped_start = self.start.max(start);
        let clipped_end = self.end.min(end);
        (clipped_start < clipped_end).then_some(Interval {
            start: clipped_start,
            end: clipped_end,
        })
    }
}

/// Raw start/end pair as reported by an event store, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyEvent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyEvent {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

impl TryFrom<BusyEvent> for Interval {
    type Error = ScheduleError;

    fn try_from(event: BusyEvent) -> ScheduleResult<Self> {
        Interval::new(event.start, event.end)
    }
}

impl From<Interval> for BusyEvent {
    fn from(interval: Interval) -> Self {
        BusyEvent {
            start: interval.start,
            end: interval.end,
        }
    }
}

//! Free-slot search over a merged busy timeline.
//!
//! Two modes share the same inputs:
//!
//! - [`find_first_slot`] steps a meeting-sized candidate forward from the start
//!   of the day and returns the first one that clears every busy interval.
//! - [`find_all_gaps`] lists every gap in the day that can hold the meeting.
//!
//! Neither does any I/O; both reject an invalid window before searching.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::errors::ScheduleResult;
use crate::merge::MergedBusyTimeline;
use crate::models::{FreeSlot, Interval, SearchWindow};

/// First meeting-length slot, stepping by `window.step` from the start of the day.
///
/// Returns `Ok(None)` when every candidate collides with busy time or the
/// meeting does not fit in the day at all.
pub fn find_first_slot(
    timeline: &MergedBusyTimeline,
    window: &SearchWindow,
) -> ScheduleResult<Option<FreeSlot>> {
    let bounds = window.bounds()?;
    let meeting = window.meeting_duration;
    if meeting > bounds.span() {
        debug!(%meeting, "meeting is longer than the window");
        return Ok(None);
    }

    let mut candidate_start = bounds.start;
    let mut attempts = 0usize;
    // Overflowing the representable range ends the search like running past the day.
    while let Some(candidate_end) = candidate_start
        .checked_add_signed(meeting)
        .filter(|end| *end <= bounds.end)
    {
        attempts += 1;
        let candidate = Interval::new(candidate_start, candidate_end)?;
        if !timeline.overlaps(&candidate) {
            debug!(attempts, start = %candidate.start(), "found common slot");
            return Ok(Some(FreeSlot::from(candidate)));
        }
        // Each step adds to the previous candidate, never to a re-derived wall-clock value.
        match candidate_start.checked_add_signed(window.step) {
            Some(next) => candidate_start = next,
            None => break,
        }
    }

    debug!(attempts, "no common slot in window");
    Ok(None)
}

/// Every gap inside the day's window that is at least one meeting long.
pub fn find_all_gaps(
    timeline: &MergedBusyTimeline,
    window: &SearchWindow,
) -> ScheduleResult<Vec<FreeSlot>> {
    let bounds = window.bounds()?;
    Ok(free_gaps_between(
        timeline,
        bounds.start,
        bounds.end,
        window.meeting_duration,
    ))
}

/// Gaps between busy intervals, clipped to `[start, end)`, dropping any gap
/// shorter than `min_duration`.
///
/// Works for arbitrary spans, including ranges covering several days.
pub fn free_gaps_between(
    timeline: &MergedBusyTimeline,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    min_duration: Duration,
) -> Vec<FreeSlot> {
    let mut gaps = Vec::new();
    if start >= end {
        return gaps;
    }

    let mut cursor = start;
    for busy in timeline.intervals() {
        if busy.end() <= start {
            continue;
        }
        if busy.start() >= end {
            break;
        }
        if cursor < busy.start() {
            gaps.push(FreeSlot::new(cursor, busy.start()));
        }
        cursor = cursor.max(busy.end());
    }

    // Trailing gap after the last busy interval.
    if cursor < end {
        gaps.push(FreeSlot::new(cursor, end));
    }

    gaps.retain(|gap| gap.end - gap.start >= min_duration);
    gaps
}

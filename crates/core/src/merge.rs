//! Interval merging.
//!
//! Sorts busy intervals by start (shorter first on ties), then sweeps once,
//! folding every interval that starts at or before the running end into the
//! current block. Touching intervals are folded too: a meeting that ends at
//! 10:00 and one that starts at 10:00 leave no usable gap.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::ScheduleResult;
use crate::models::{Interval, MemberId, MemberSchedule};

/// Sorted, maximally coalesced busy intervals.
///
/// For every neighbouring pair `a`, `b` the timeline guarantees
/// `a.end() < b.start()`. Values are only produced by merging, so the
/// invariant cannot be broken from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedBusyTimeline {
    intervals: Vec<Interval>,
}

impl MergedBusyTimeline {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merges any collection of valid intervals into a timeline.
    pub fn merge<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut sorted: Vec<Interval> = intervals.into_iter().collect();
        sorted.sort_unstable();

        let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
        for next in sorted {
            if let Some(last) = merged.last_mut() {
                if next.start() <= last.end() {
                    *last = last.stretched_to(next.end());
                    continue;
                }
            }
            merged.push(next);
        }

        Self { intervals: merged }
    }

    /// Validates raw `(start, end)` pairs, then merges them.
    ///
    /// Fails on the first pair with `end <= start` before any merging starts.
    pub fn from_raw<I>(pairs: I) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
    {
        let intervals = pairs
            .into_iter()
            .map(|(start, end)| Interval::new(start, end))
            .collect::<ScheduleResult<Vec<_>>>()?;
        Ok(Self::merge(intervals))
    }

    /// Flattens every member's busy time into one timeline ("is anyone busy?").
    pub fn from_schedules(schedules: &[MemberSchedule]) -> Self {
        Self::merge(
            schedules
                .iter()
                .flat_map(|schedule| schedule.busy.iter().copied()),
        )
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn total_busy(&self) -> Duration {
        self.intervals
            .iter()
            .fold(Duration::zero(), |acc, interval| acc + interval.duration())
    }

    /// True when some busy interval contains `instant`.
    pub fn is_busy_at(&self, instant: DateTime<Utc>) -> bool {
        // First interval that ends after `instant` is the only candidate.
        let idx = self.intervals.partition_point(|b| b.end() <= instant);
        self.intervals
            .get(idx)
            .is_some_and(|busy| busy.contains(instant))
    }

    /// True when `candidate` shares any instant with a busy interval.
    pub fn overlaps(&self, candidate: &Interval) -> bool {
        let idx = self
            .intervals
            .partition_point(|b| b.end() <= candidate.start());
        self.intervals
            .get(idx)
            .is_some_and(|busy| busy.start() < candidate.end())
    }

    /// The part of the timeline inside `[start, end)`.
    pub fn clip(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            intervals: self
                .intervals
                .iter()
                .filter_map(|busy| busy.clip(start, end))
                .collect(),
        }
    }
}

/// Merges each member's busy time on its own.
pub fn merge_per_member(schedules: &[MemberSchedule]) -> BTreeMap<MemberId, MergedBusyTimeline> {
    let mut grouped: BTreeMap<MemberId, Vec<Interval>> = BTreeMap::new();
    for schedule in schedules {
        grouped
            .entry(schedule.member_id.clone())
            .or_default()
            .extend(schedule.busy.iter().copied());
    }
    grouped
        .into_iter()
        .map(|(member_id, busy)| (member_id, MergedBusyTimeline::merge(busy)))
        .collect()
}

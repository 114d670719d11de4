use std::sync::Arc;
use tracing::info;

use crate::collector::ScheduleCollector;
use crate::errors::{ScheduleError, ScheduleResult};
use crate::merge::{MergedBusyTimeline, merge_per_member};
use crate::models::{
    DateRange, FreeSlot, MemberId, SearchWindow, availability::GroupAvailability,
};
use crate::slots;
use crate::sources::EventSource;

/// Collect → merge → search, end to end.
///
/// Every call builds its own schedules and timeline; nothing is cached
/// between calls, so repeated calls over unchanged calendars agree.
#[derive(Clone)]
pub struct SchedulingEngine {
    collector: ScheduleCollector,
}

impl SchedulingEngine {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            collector: ScheduleCollector::new(source),
        }
    }

    /// First slot in the window where every member is free, if any.
    pub async fn find_first_common_slot(
        &self,
        member_ids: &[MemberId],
        range: Option<DateRange>,
        window: &SearchWindow,
    ) -> ScheduleResult<Option<FreeSlot>> {
        // Reject a bad window before touching the store.
        window.bounds()?;
        let timeline = self.combined_timeline(member_ids, range).await?;
        let slot = slots::find_first_slot(&timeline, window)?;
        info!(
            members = member_ids.len(),
            busy_blocks = timeline.len(),
            found = slot.is_some(),
            "first common slot search finished"
        );
        Ok(slot)
    }

    /// Every gap in the window that can hold the meeting for all members.
    pub async fn find_all_gaps(
        &self,
        member_ids: &[MemberId],
        range: Option<DateRange>,
        window: &SearchWindow,
    ) -> ScheduleResult<Vec<FreeSlot>> {
        window.bounds()?;
        let timeline = self.combined_timeline(member_ids, range).await?;
        let gaps = slots::find_all_gaps(&timeline, window)?;
        info!(
            members = member_ids.len(),
            busy_blocks = timeline.len(),
            gaps = gaps.len(),
            "common gap search finished"
        );
        Ok(gaps)
    }

    /// Merged busy time per member and across the whole set.
    pub async fn busy_timelines(
        &self,
        member_ids: &[MemberId],
        range: Option<DateRange>,
    ) -> ScheduleResult<GroupAvailability> {
        ensure_members(member_ids)?;
        let schedules = self.collector.collect(member_ids, range).await?;
        let combined = MergedBusyTimeline::from_schedules(&schedules);
        let members = merge_per_member(&schedules)
            .into_iter()
            .map(|(member_id, timeline)| (member_id, timeline.into_intervals()))
            .collect();
        Ok(GroupAvailability {
            members,
            combined: combined.into_intervals(),
        })
    }

    async fn combined_timeline(
        &self,
        member_ids: &[MemberId],
        range: Option<DateRange>,
    ) -> ScheduleResult<MergedBusyTimeline> {
        ensure_members(member_ids)?;
        let schedules = self.collector.collect(member_ids, range).await?;
        Ok(MergedBusyTimeline::from_schedules(&schedules))
    }
}

fn ensure_members(member_ids: &[MemberId]) -> ScheduleResult<()> {
    if member_ids.is_empty() {
        return Err(ScheduleError::Validation(
            "At least one member is required to search for a common slot".to_string(),
        ));
    }
    Ok(())
}

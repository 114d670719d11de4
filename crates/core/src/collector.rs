use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::{MemberFailure, ScheduleError, ScheduleResult};
use crate::models::{DateRange, Interval, MemberId, MemberSchedule};
use crate::sources::EventSource;

/// Turns member ids into busy intervals by querying the event store.
///
/// Fetches run concurrently. The collector waits for all of them and then
/// fails the whole collection if any one failed, naming every member that
/// could not be read. A partial set of schedules is never returned.
#[derive(Clone)]
pub struct ScheduleCollector {
    source: Arc<dyn EventSource>,
}

impl ScheduleCollector {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }

    /// One schedule per distinct member id, in first-appearance order.
    pub async fn collect(
        &self,
        member_ids: &[MemberId],
        range: Option<DateRange>,
    ) -> ScheduleResult<Vec<MemberSchedule>> {
        let mut seen = HashSet::new();
        let members: Vec<&MemberId> = member_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .collect();

        debug!(members = members.len(), ?range, "collecting member schedules");

        let source = &self.source;
        let fetches = members.iter().map(|&member_id| async move {
            let result = source.query_events_for_member(member_id, range).await;
            (member_id, result)
        });
        let results = join_all(fetches).await;

        let mut failures = Vec::new();
        let mut fetched = Vec::with_capacity(results.len());
        for (member_id, result) in results {
            match result {
                Ok(events) => fetched.push((member_id, events)),
                Err(err) => {
                    warn!(member_id = %member_id, error = %err, "failed to fetch member events");
                    failures.push(MemberFailure {
                        member_id: member_id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        if !failures.is_empty() {
            return Err(ScheduleError::CollectionFailure(failures));
        }

        fetched
            .into_iter()
            .map(|(member_id, events)| {
                let busy = events
                    .into_iter()
                    .map(Interval::try_from)
                    .collect::<ScheduleResult<Vec<_>>>()
                    .inspect_err(|err| {
                        warn!(member_id = %member_id, error = %err, "member has an invalid event");
                    })?;
                Ok(MemberSchedule::new(member_id.clone(), busy))
            })
            .collect()
    }
}

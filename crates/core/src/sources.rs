use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::models::{BusyEvent, DateRange, MemberId};

/// Read access to the event store.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Start/end of every event attributable to `member_id`.
    ///
    /// With a `range`, only events overlapping it are returned; without one,
    /// all of the member's events are.
    async fn query_events_for_member(
        &self,
        member_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<BusyEvent>>;
}

/// Group membership lookup.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Members of `group_id`, or `None` if no such group exists.
    async fn group_members(&self, group_id: Uuid) -> Result<Option<Vec<MemberId>>>;
}

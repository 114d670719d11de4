use async_trait::async_trait;
use commonslot_core::{
    models::{BusyEvent, DateRange, MemberId},
    sources::{EventSource, MemberDirectory},
};
use eyre::{Result, WrapErr};
use tracing::debug;
use uuid::Uuid;

use crate::{DbPool, repositories};

/// PostgreSQL-backed event store and group directory.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl EventSource for PgStore {
    async fn query_events_for_member(
        &self,
        member_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<BusyEvent>> {
        let events = repositories::event::get_events_for_member(&self.pool, member_id, range)
            .await
            .wrap_err_with(|| format!("Failed to load events for member {member_id}"))?;
        debug!(member_id, count = events.len(), "loaded member events");
        Ok(events.iter().map(BusyEvent::from).collect())
    }
}

#[async_trait]
impl MemberDirectory for PgStore {
    async fn group_members(&self, group_id: Uuid) -> Result<Option<Vec<MemberId>>> {
        if repositories::group::get_group_by_id(&self.pool, group_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        let members = repositories::group::get_group_members(&self.pool, group_id).await?;
        Ok(Some(members.into_iter().map(|m| m.user_id).collect()))
    }
}

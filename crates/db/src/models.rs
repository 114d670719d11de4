use chrono::{DateTime, Utc};
use commonslot_core::models::BusyEvent;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEvent {
    pub id: Uuid,
    pub calendar_id: Option<Uuid>,
    pub title: String,
    pub created_by: String,
    pub member_ids: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&DbEvent> for BusyEvent {
    fn from(event: &DbEvent) -> Self {
        BusyEvent::new(event.start_time, event.end_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGroup {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGroupMember {
    pub group_id: Uuid,
    pub user_id: String,
}

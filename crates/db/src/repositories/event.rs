use crate::models::DbEvent;
use chrono::{DateTime, Utc};
use commonslot_core::models::DateRange;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_event(
    pool: &Pool<Postgres>,
    calendar_id: Option<Uuid>,
    title: &str,
    created_by: &str,
    member_ids: &[String],
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbEvent> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let event = sqlx::query_as::<_, DbEvent>(
        r#"
        INSERT INTO events (id, calendar_id, title, created_by, member_ids, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, calendar_id, title, created_by, member_ids, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(calendar_id)
    .bind(title)
    .bind(created_by)
    .bind(member_ids)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(event)
}

/// Events the member created or was invited to, optionally limited to those
/// overlapping `range`.
pub async fn get_events_for_member(
    pool: &Pool<Postgres>,
    member_id: &str,
    range: Option<DateRange>,
) -> Result<Vec<DbEvent>> {
    let events = match range {
        Some(range) => {
            sqlx::query_as::<_, DbEvent>(
                r#"
                SELECT id, calendar_id, title, created_by, member_ids, start_time, end_time, created_at
                FROM events
                WHERE (created_by = $1 OR $1 = ANY(member_ids))
                  AND start_time < $3
                  AND end_time > $2
                ORDER BY start_time ASC
                "#,
            )
            .bind(member_id)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DbEvent>(
                r#"
                SELECT id, calendar_id, title, created_by, member_ids, start_time, end_time, created_at
                FROM events
                WHERE created_by = $1 OR $1 = ANY(member_ids)
                ORDER BY start_time ASC
                "#,
            )
            .bind(member_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(events)
}

pub async fn delete_event(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

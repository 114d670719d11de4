use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create groups table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            created_by VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create group_members table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_members (
            group_id UUID NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
            user_id VARCHAR(255) NOT NULL,
            PRIMARY KEY (group_id, user_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create events table. Start/end ordering is validated when schedules
    // are collected, not here, so legacy rows with bad bounds surface as errors.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            calendar_id UUID NULL,
            title VARCHAR(255) NOT NULL,
            created_by VARCHAR(255) NOT NULL,
            member_ids TEXT[] NOT NULL DEFAULT '{}',
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_events_created_by ON events(created_by);
        CREATE INDEX IF NOT EXISTS idx_events_member_ids ON events USING GIN (member_ids);
        CREATE INDEX IF NOT EXISTS idx_events_start_time ON events(start_time);
        CREATE INDEX IF NOT EXISTS idx_events_end_time ON events(end_time);
        CREATE INDEX IF NOT EXISTS idx_group_members_group_id ON group_members(group_id);
        CREATE INDEX IF NOT EXISTS idx_group_members_user_id ON group_members(user_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

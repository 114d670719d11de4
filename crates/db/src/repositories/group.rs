use crate::models::{DbGroup, DbGroupMember};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Creates a group and enrols its creator as the first member.
pub async fn create_group(
    pool: &Pool<Postgres>,
    name: &str,
    description: Option<&str>,
    created_by: &str,
) -> Result<DbGroup> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let group = sqlx::query_as::<_, DbGroup>(
        r#"
        INSERT INTO groups (id, name, description, created_by, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, description, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(created_by)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO group_members (group_id, user_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(id)
    .bind(created_by)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(group)
}

pub async fn get_group_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbGroup>> {
    let group = sqlx::query_as::<_, DbGroup>(
        r#"
        SELECT id, name, description, created_by, created_at
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// Adds a member; adding someone already in the group is a no-op.
pub async fn add_member_to_group(
    pool: &Pool<Postgres>,
    group_id: Uuid,
    user_id: &str,
) -> Result<DbGroupMember> {
    sqlx::query(
        r#"
        INSERT INTO group_members (group_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (group_id, user_id) DO NOTHING
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(DbGroupMember {
        group_id,
        user_id: user_id.to_string(),
    })
}

pub async fn remove_member_from_group(
    pool: &Pool<Postgres>,
    group_id: Uuid,
    user_id: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM group_members
        WHERE group_id = $1 AND user_id = $2
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_group_members(
    pool: &Pool<Postgres>,
    group_id: Uuid,
) -> Result<Vec<DbGroupMember>> {
    let members = sqlx::query_as::<_, DbGroupMember>(
        r#"
        SELECT group_id, user_id
        FROM group_members
        WHERE group_id = $1
        ORDER BY user_id ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

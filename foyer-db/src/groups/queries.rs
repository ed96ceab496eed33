use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::*;

#[tracing::instrument(name = "Get group with id", skip(group_id, pool))]
pub async fn get_group_with_id(
    group_id: Uuid,
    pool: &SqlitePool,
) -> Result<Option<GroupModel>, sqlx::Error> {
    sqlx::query_as::<_, GroupModel>(
        r#"
        SELECT *
        FROM groups
        WHERE groups.id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await
}

#[tracing::instrument(name = "Get all groups", skip(pool))]
pub async fn get_groups(pool: &SqlitePool) -> Result<Vec<GroupModel>, sqlx::Error> {
    sqlx::query_as::<_, GroupModel>(
        r#"
        SELECT *
        FROM groups
        ORDER BY groups.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

#[tracing::instrument(name = "Saving a new group to the database", skip(pool, name))]
pub async fn insert_group(pool: &SqlitePool, name: &str) -> Result<GroupModel, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, GroupModel>(
        r#"
        INSERT INTO groups (id, name, updated_at, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use super::models::*;

#[tracing::instrument(
    name = "Saving a new invitation to the database",
    skip(transaction, new_invitation, token)
)]
pub async fn insert_invitation(
    transaction: &mut Transaction<'_, Sqlite>,
    new_invitation: &NewInvitation,
    created_by: Uuid,
    token: &str,
) -> Result<InvitationModel, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, InvitationModel>(
        r#"
        INSERT INTO invitations (id, group_id, created_by, token, max_uses, current_uses, expires_at, revoked, note, updated_at, created_at)
        VALUES ($1, $2, $3, $4, $5, 0, $6, FALSE, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_invitation.group_id)
    .bind(created_by)
    .bind(token)
    .bind(new_invitation.max_uses.map(|x| x.get()))
    .bind(new_invitation.expires_in_hours.map(|x| x.expires_at(now)))
    .bind(new_invitation.note.as_ref().map(|x| x.as_ref().to_string()))
    .bind(now)
    .bind(now)
    .fetch_one(&mut **transaction)
    .await
}

#[tracing::instrument(name = "Get invitation with id", skip(invitation_id, pool))]
pub async fn get_invitation_with_id(
    invitation_id: Uuid,
    pool: &SqlitePool,
) -> Result<Option<InvitationModel>, sqlx::Error> {
    sqlx::query_as::<_, InvitationModel>(
        r#"
        SELECT *
        FROM invitations
        WHERE invitations.id = $1
        "#,
    )
    .bind(invitation_id)
    .fetch_optional(pool)
    .await
}

#[tracing::instrument(name = "Get invitation for token", skip(token, pool))]
pub async fn get_invitation_with_token(
    token: &str,
    pool: &SqlitePool,
) -> Result<Option<InvitationModel>, sqlx::Error> {
    sqlx::query_as::<_, InvitationModel>(
        r#"
        SELECT *
        FROM invitations
        WHERE invitations.token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

#[tracing::instrument(name = "Get invitations for group", skip(group_id, pool))]
pub async fn get_invitations_for_group(
    group_id: Uuid,
    pool: &SqlitePool,
) -> Result<Vec<InvitationModel>, sqlx::Error> {
    sqlx::query_as::<_, InvitationModel>(
        r#"
        SELECT *
        FROM invitations
        WHERE invitations.group_id = $1
        ORDER BY invitations.created_at ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}

///
/// Consume one use of an invitation with compare-and-swap semantics.
///
/// The update only applies when `current_uses` still matches the value the
/// caller validated against and the invitation has not been revoked in the
/// meantime. Returns `false` when the swap lost against a concurrent
/// mutation, so the caller can re-read and retry.
///
#[tracing::instrument(
    name = "Increment invitation uses",
    skip(pool, invitation_id, expected_current_uses, now)
)]
pub async fn increment_invitation_uses(
    pool: &SqlitePool,
    invitation_id: Uuid,
    expected_current_uses: i64,
    now: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE invitations
        SET current_uses = current_uses + 1, updated_at = $1
        WHERE invitations.id = $2 AND invitations.current_uses = $3 AND invitations.revoked = FALSE
        "#,
    )
    .bind(now)
    .bind(invitation_id)
    .bind(expected_current_uses)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

///
/// Mark an invitation as revoked.
///
/// Idempotent: revoking an already revoked invitation changes nothing, not
/// even `updated_at`. Returns whether this call performed the transition.
///
#[tracing::instrument(name = "Revoke invitation", skip(pool, invitation_id))]
pub async fn set_invitation_revoked(
    pool: &SqlitePool,
    invitation_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE invitations
        SET revoked = TRUE, updated_at = $1
        WHERE invitations.id = $2 AND invitations.revoked = FALSE
        "#,
    )
    .bind(Utc::now())
    .bind(invitation_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

#[tracing::instrument(name = "Delete invitation", skip(pool, invitation_id))]
pub async fn delete_invitation(
    pool: &SqlitePool,
    invitation_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM invitations
        WHERE invitations.id = $1
        "#,
    )
    .bind(invitation_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

use chrono::Utc;
use foyer_shared::invitations::InvitationStatus;
use sqlx::SqlitePool;

use super::{
    models::InvitationModel,
    queries::{get_invitation_with_token, increment_invitation_uses},
};

/// Upper bound on validate-then-increment rounds before giving up.
const MAX_REDEEM_ATTEMPTS: u32 = 5;

///
/// Possible failures of a redemption attempt.
///
#[derive(Debug, thiserror::Error)]
pub enum RedeemError {
    /// No invitation exists for the presented token.
    #[error("Invalid invitation token")]
    UnknownToken,
    /// The invitation exists but its lifecycle forbids redemption.
    #[error("This invitation is {0}")]
    NotRedeemable(InvitationStatus),
    /// The compare-and-swap lost against concurrent redemptions too often.
    #[error("Invitation is contended, please retry")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

///
/// Redeem one use of the invitation identified by `token`.
///
/// The read-validate-increment sequence is atomic with respect to other
/// redeemers: the increment only commits when `current_uses` is unchanged
/// since validation, so two concurrent redemptions can never jointly exceed
/// `max_uses`. A lost swap re-reads and revalidates, bounded by
/// [`MAX_REDEEM_ATTEMPTS`].
///
/// Returns the invitation as it looks after the consumed use.
///
#[tracing::instrument(name = "Redeem invitation", skip(pool, token))]
pub async fn redeem_invitation(
    pool: &SqlitePool,
    token: &str,
) -> Result<InvitationModel, RedeemError> {
    for _ in 0..MAX_REDEEM_ATTEMPTS {
        let invitation = get_invitation_with_token(token, pool)
            .await?
            .ok_or(RedeemError::UnknownToken)?;

        let now = Utc::now();

        if let Some(reason) = invitation.deny_reason(now) {
            return Err(RedeemError::NotRedeemable(reason));
        }

        if increment_invitation_uses(pool, invitation.id, invitation.current_uses, now).await? {
            return Ok(InvitationModel {
                current_uses: invitation.current_uses + 1,
                updated_at: now,
                ..invitation
            });
        }

        // Lost the swap against a concurrent mutation, re-read and revalidate.
    }

    Err(RedeemError::Conflict)
}

use chrono::{DateTime, Duration, Utc};
use foyer_shared::invitations::{InvitationResponse, InvitationStatus};
use uuid::Uuid;

///
/// Contains validated data to create a new invitation.
///
/// The token itself is generated by the caller (it is not domain input) and
/// passed to the insert query separately, together with the issuing user.
///
pub struct NewInvitation {
    pub group_id: Uuid,
    pub max_uses: Option<MaxUses>,
    pub expires_in_hours: Option<ExpiresInHours>,
    pub note: Option<InvitationNote>,
}

///
/// Model to fetch an invitation from the database with.
///
/// The lifecycle status is intentionally not a column: it is derived from
/// the stored facts on every read, so it can never diverge from them.
///
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct InvitationModel {
    pub id: Uuid,
    pub group_id: Uuid,
    pub created_by: Uuid,
    pub token: String,
    pub max_uses: Option<i64>,
    pub current_uses: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub revoked: bool,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl InvitationModel {
    ///
    /// Evaluate why the invitation cannot be redeemed at `now`, if anything.
    ///
    /// Checks in order: explicit revocation, expiry, use exhaustion. Returns
    /// `None` when the invitation is redeemable.
    ///
    pub fn deny_reason(&self, now: DateTime<Utc>) -> Option<InvitationStatus> {
        if self.revoked {
            return Some(InvitationStatus::Revoked);
        }

        if let Some(expires_at) = self.expires_at {
            if now >= expires_at {
                return Some(InvitationStatus::Expired);
            }
        }

        if let Some(max_uses) = self.max_uses {
            if self.current_uses >= max_uses {
                return Some(InvitationStatus::Exhausted);
            }
        }

        None
    }

    ///
    /// Derive the lifecycle status of the invitation at `now`.
    ///
    pub fn status(&self, now: DateTime<Utc>) -> InvitationStatus {
        self.deny_reason(now).unwrap_or(InvitationStatus::Active)
    }

    ///
    /// Turn the model into a response, enriched with the group name and the
    /// shareable invitation URL.
    ///
    pub fn into_response(
        self,
        group_name: String,
        invitation_url: String,
        now: DateTime<Utc>,
    ) -> InvitationResponse {
        let status = self.status(now);

        InvitationResponse {
            id: self.id,
            group_id: self.group_id,
            group_name,
            created_by: self.created_by,
            token: self.token,
            invitation_url,
            max_uses: self.max_uses,
            current_uses: self.current_uses,
            expires_at: self.expires_at,
            status,
            note: self.note,
            updated_at: self.updated_at,
            created_at: self.created_at,
        }
    }
}

///
/// Provides a validated cap on invitation redemptions.
///
#[derive(Debug, Clone, Copy)]
pub struct MaxUses(i64);

impl MaxUses {
    ///
    /// Parse a [`MaxUses`] from an [`i64`]. The cap must be positive.
    ///
    pub fn parse(value: i64) -> Result<MaxUses, String> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(format!("{} is not a valid maximum use count!", value))
        }
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

///
/// Provides a validated invitation lifetime in hours.
///
#[derive(Debug, Clone, Copy)]
pub struct ExpiresInHours(i64);

impl ExpiresInHours {
    pub fn parse(value: i64) -> Result<ExpiresInHours, String> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(format!("{} is not a valid expiry in hours!", value))
        }
    }

    ///
    /// Compute the absolute expiry timestamp relative to `now`.
    ///
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::hours(self.0)
    }
}

///
/// Provides a validated free-text note attached to an invitation.
///
#[derive(Debug)]
pub struct InvitationNote(String);

impl InvitationNote {
    pub fn parse(value: String) -> Result<InvitationNote, String> {
        let value = value.trim();

        if validator::validate_length(value, None, Some(500), None) {
            Ok(Self(value.to_string()))
        } else {
            Err("Invitation notes are limited to 500 characters!".to_string())
        }
    }
}

impl AsRef<str> for InvitationNote {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

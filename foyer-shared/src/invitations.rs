use chrono::{DateTime, Utc};
use uuid::Uuid;

///
/// Lifecycle state of an invitation.
///
/// Only the `revoked` flag is persisted; the other states are derived from
/// the stored facts (`expires_at`, `max_uses`, `current_uses`) at evaluation
/// time. `Revoked`, `Expired` and `Exhausted` are terminal for redemption.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Active,
    Revoked,
    Expired,
    Exhausted,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Active => "active",
            InvitationStatus::Revoked => "revoked",
            InvitationStatus::Expired => "expired",
            InvitationStatus::Exhausted => "exhausted",
        }
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Model for invitations that can be used for responses.
///
/// Contains the shareable `invitation_url` and the name of the group the
/// invitation grants access to, on top of the stored invitation fields.
///
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InvitationResponse {
    pub id: Uuid,
    pub group_id: Uuid,
    pub group_name: String,
    pub created_by: Uuid,
    pub token: String,
    pub invitation_url: String,
    pub max_uses: Option<i64>,
    pub current_uses: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: InvitationStatus,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

///
/// Response for the public validation endpoint.
///
/// A bad or unknown token never surfaces an error, it results in
/// `valid: false` and a human-readable `message` instead.
///
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct InvitationValidationResponse {
    pub valid: bool,
    pub group_id: Option<Uuid>,
    pub group_name: Option<String>,
    pub message: Option<String>,
}

impl InvitationValidationResponse {
    pub fn valid(group_id: Uuid, group_name: String) -> Self {
        Self {
            valid: true,
            group_id: Some(group_id),
            group_name: Some(group_name),
            message: Some("Invitation is valid".to_string()),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            group_id: None,
            group_name: None,
            message: Some(message.into()),
        }
    }
}

///
/// Response for the public redemption endpoint.
///
/// `status` reflects the lifecycle state after the redemption attempt, so a
/// successful use of the last remaining slot reports `exhausted`.
///
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct InvitationRedemptionResponse {
    pub success: bool,
    pub group_id: Option<Uuid>,
    pub group_name: Option<String>,
    pub status: Option<InvitationStatus>,
    pub message: Option<String>,
}

impl InvitationRedemptionResponse {
    pub fn redeemed(group_id: Uuid, group_name: String, status: InvitationStatus) -> Self {
        Self {
            success: true,
            group_id: Some(group_id),
            group_name: Some(group_name),
            status: Some(status),
            message: Some("Invitation redeemed successfully".to_string()),
        }
    }

    pub fn denied(status: Option<InvitationStatus>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            group_id: None,
            group_name: None,
            status,
            message: Some(message.into()),
        }
    }
}

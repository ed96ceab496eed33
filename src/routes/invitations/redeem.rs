use actix_http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use foyer_db::groups::queries::get_group_with_id;
use foyer_db::invitations::redeem::{redeem_invitation, RedeemError};
use foyer_shared::{
    error_chain_fmt, invitations::InvitationRedemptionResponse, ErrorDetail,
};
use sqlx::SqlitePool;

use crate::routes::storage::{storage_error, StorageError};

#[derive(thiserror::Error)]
pub enum RedeemRouteError {
    /// Bounded CAS retries were exhausted under contention.
    #[error("Invitation is contended, please retry")]
    ConflictError,
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl std::fmt::Debug for RedeemRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RedeemRouteError {
    fn status_code(&self) -> actix_http::StatusCode {
        match self {
            RedeemRouteError::ConflictError => StatusCode::CONFLICT,
            RedeemRouteError::StorageError(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

///
/// Public redemption endpoint, no authentication required.
///
/// Consumes one use of the invitation, atomically with validation. Lifecycle
/// denials (unknown, revoked, expired, exhausted) are reported in the body
/// with `success: false`, mirroring the validation endpoint.
///
#[tracing::instrument(name = "Redeem invitation token", skip(token, pool))]
pub async fn redeem(
    token: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, RedeemRouteError> {
    let invitation = match redeem_invitation(&pool, &token).await {
        Ok(invitation) => invitation,
        Err(RedeemError::UnknownToken) => {
            return Ok(HttpResponse::Ok().json(InvitationRedemptionResponse::denied(
                None,
                "Invalid invitation token",
            )));
        }
        Err(RedeemError::NotRedeemable(reason)) => {
            return Ok(HttpResponse::Ok().json(InvitationRedemptionResponse::denied(
                Some(reason),
                format!("This invitation is {}", reason),
            )));
        }
        Err(RedeemError::Conflict) => return Err(RedeemRouteError::ConflictError),
        Err(RedeemError::Database(error)) => {
            return Err(storage_error("Failed to redeem the invitation.")(error).into());
        }
    };

    let group_name = get_group_with_id(invitation.group_id, &pool)
        .await
        .map_err(storage_error(
            "Failed to retrieve the group from the database.",
        ))?
        .map(|group| group.name)
        .unwrap_or_else(|| "Unknown Group".to_string());

    let status = invitation.status(Utc::now());

    Ok(HttpResponse::Ok().json(InvitationRedemptionResponse::redeemed(
        invitation.group_id,
        group_name,
        status,
    )))
}

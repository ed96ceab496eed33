use actix_http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use foyer_db::invitations::queries::{get_invitation_with_id, set_invitation_revoked};
use foyer_shared::{error_chain_fmt, jwt::AuthorizationService, AckResponse, ErrorDetail};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::routes::storage::{storage_error, StorageError};

#[derive(thiserror::Error)]
pub enum RevokeError {
    #[error("Invitation not found")]
    NotFoundError,
    #[error("You do not have permission to revoke this invitation")]
    ForbiddenError,
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl std::fmt::Debug for RevokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RevokeError {
    fn status_code(&self) -> actix_http::StatusCode {
        match self {
            RevokeError::NotFoundError => StatusCode::NOT_FOUND,
            RevokeError::ForbiddenError => StatusCode::FORBIDDEN,
            RevokeError::StorageError(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

#[tracing::instrument(name = "Revoke invitation", skip(pool, auth), fields(user_id = %auth.claims.id, user_email = %auth.claims.email))]
pub async fn revoke(
    invitation_id: web::Path<Uuid>,
    pool: web::Data<SqlitePool>,
    auth: AuthorizationService,
) -> Result<HttpResponse, RevokeError> {
    let invitation = get_invitation_with_id(*invitation_id, &pool)
        .await
        .map_err(storage_error(
            "Failed to retrieve the invitation from the database.",
        ))?
        .ok_or(RevokeError::NotFoundError)?;

    if !auth.claims.can_manage_group(invitation.group_id) {
        return Err(RevokeError::ForbiddenError);
    }

    // Revoking an already revoked invitation is a no-op success.
    set_invitation_revoked(&pool, invitation.id)
        .await
        .map_err(storage_error(
            "Failed to revoke the invitation in the database.",
        ))?;

    Ok(HttpResponse::Ok().json(AckResponse {
        success: true,
        message: "Invitation revoked successfully".to_string(),
    }))
}
